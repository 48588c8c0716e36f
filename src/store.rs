use chrono::{DateTime, TimeZone};

use crate::habit::Habit;
use crate::storage::PreferenceStore;

/// Preference key holding the serialized habit list.
pub const HABITS_KEY: &str = "SavedHabits";

type Listener = Box<dyn Fn(&[Habit])>;

/// Owns the habit list and writes it through to a [`PreferenceStore`] after
/// every change.
///
/// Persistence faults never reach the caller: a missing or unreadable blob
/// loads as an empty list and failed writes are logged and dropped.
pub struct HabitStore<P: PreferenceStore> {
    prefs: P,
    habits: Vec<Habit>,
    listeners: Vec<Listener>,
}

impl<P: PreferenceStore> HabitStore<P> {
    /// Loads the saved habits and applies the day rollover for `now`.
    pub fn open<Tz: TimeZone>(prefs: P, now: &DateTime<Tz>) -> Self {
        let mut store = Self {
            prefs,
            habits: Vec::new(),
            listeners: Vec::new(),
        };
        store.habits = store.load_habits();
        log::info!("Loaded {} habits", store.habits.len());
        store.refresh_for_new_day(now);
        store
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id() == habit_id)
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    /// Reads the persisted habit list without touching the in-memory one.
    pub fn load_habits(&self) -> Vec<Habit> {
        match self.prefs.data(HABITS_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable habit data: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read habit data: {}", e);
                Vec::new()
            }
        }
    }

    /// Persists `habits` under [`HABITS_KEY`], replacing whatever was there.
    pub fn save_habits(&mut self, habits: &[Habit]) {
        write_habits(&mut self.prefs, habits);
    }

    /// Persists the in-memory list.
    pub fn save(&mut self) {
        write_habits(&mut self.prefs, &self.habits);
    }

    /// Registers a callback run with the current list after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&[Habit]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_habit(&mut self, habit: Habit) -> &Habit {
        log::info!("Adding habit {} ({})", habit.name, habit.id());
        let index = self.habits.len();
        self.habits.push(habit);
        self.commit();
        &self.habits[index]
    }

    pub fn remove_habit(&mut self, habit_id: &str) -> Option<Habit> {
        let index = self.position(habit_id)?;
        let removed = self.habits.remove(index);
        log::info!("Removed habit {} ({})", removed.name, removed.id());
        self.commit();
        Some(removed)
    }

    /// Toggles today's completion of the habit with `habit_id`.
    pub fn toggle<Tz: TimeZone>(&mut self, habit_id: &str, now: &DateTime<Tz>) -> Option<&Habit> {
        let index = self.position(habit_id)?;
        self.habits[index].toggle(now);
        log::debug!(
            "Toggled habit {}: streak {}",
            self.habits[index].id(),
            self.habits[index].streak()
        );
        self.commit();
        Some(&self.habits[index])
    }

    /// Applies the day rollover to every habit, saving if anything changed.
    pub fn refresh_for_new_day<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        if reset_habits_for_new_day(&mut self.habits, now) {
            log::info!("New day: cleared stale completion flags");
            self.commit();
        }
    }

    fn position(&self, habit_id: &str) -> Option<usize> {
        let index = self.habits.iter().position(|h| h.id() == habit_id);
        if index.is_none() {
            log::warn!("No habit with id {}", habit_id);
        }
        index
    }

    fn commit(&mut self) {
        write_habits(&mut self.prefs, &self.habits);
        for listener in &self.listeners {
            listener(&self.habits);
        }
    }
}

/// Resets every habit for a new day. Returns whether any habit changed.
pub fn reset_habits_for_new_day<Tz: TimeZone>(habits: &mut [Habit], now: &DateTime<Tz>) -> bool {
    habits
        .iter_mut()
        .fold(false, |changed, habit| habit.reset_for_new_day(now) || changed)
}

fn write_habits<P: PreferenceStore>(prefs: &mut P, habits: &[Habit]) {
    let encoded = match serde_json::to_vec(habits) {
        Ok(encoded) => encoded,
        Err(e) => {
            log::warn!("Failed to serialize habits: {}", e);
            return;
        }
    };
    if let Err(e) = prefs.set_data(HABITS_KEY, &encoded) {
        log::warn!("Failed to save habits: {}", e);
    }
}
