use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::is_same_day;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A tracked habit.
///
/// Completion state (`is_completed`, `streak`, `last_completed_date`) is only
/// changed through [`Habit::toggle`] and [`Habit::reset_for_new_day`], which
/// keeps the streak from being bumped twice on the same day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    id: String,
    pub name: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    is_completed: bool,
    pub is_recurring: bool,
    streak: u32,
    last_completed_date: Option<DateTime<Utc>>,
}

impl Habit {
    pub fn new(name: impl Into<String>, priority: Priority, is_recurring: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            priority,
            due_date: None,
            is_completed: false,
            is_recurring,
            streak: 0,
            last_completed_date: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_completed_date(&self) -> Option<DateTime<Utc>> {
        self.last_completed_date
    }

    /// True when the last completion happened on `now`'s calendar day.
    pub fn is_completed_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        self.last_completed_date
            .is_some_and(|last| is_same_day(&last, now))
    }

    /// Records a completion at `now`. Calling this twice on one day counts
    /// twice, so outside callers go through [`Habit::toggle`].
    pub(crate) fn mark_completed<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        self.is_completed = true;
        self.last_completed_date = Some(now.with_timezone(&Utc));
        self.streak = self.streak.saturating_add(1);
    }

    /// Clears the stale `is_completed` flag once the day has rolled over.
    ///
    /// Returns whether anything changed. `streak` and `last_completed_date`
    /// are left alone.
    pub fn reset_for_new_day<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        match self.last_completed_date {
            Some(last) if !is_same_day(&last, now) && self.is_completed => {
                self.is_completed = false;
                true
            }
            _ => false,
        }
    }

    /// Flips today's completion: completes the habit if it is not done today,
    /// otherwise undoes today's completion and gives back one streak day.
    pub fn toggle<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        if self.is_completed_today(now) {
            self.is_completed = false;
            self.last_completed_date = None;
            self.streak = self.streak.saturating_sub(1);
        } else {
            self.mark_completed(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day1() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-12T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn new_habit_starts_clean() {
        let habit = Habit::new("Drink water", Priority::Medium, true);
        assert_eq!(habit.streak(), 0);
        assert!(!habit.is_completed());
        assert!(habit.last_completed_date().is_none());
        assert!(habit.due_date.is_none());
        assert!(!habit.is_completed_today(&day1()));
        assert!(Uuid::parse_str(habit.id()).is_ok());
    }

    #[test]
    fn new_habits_get_distinct_ids() {
        let a = Habit::new("Read", Priority::Low, false);
        let b = Habit::new("Read", Priority::Low, false);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn mark_completed_sets_state() {
        let mut habit = Habit::new("Stretch", Priority::High, true);
        habit.mark_completed(&day1());
        assert!(habit.is_completed());
        assert_eq!(habit.streak(), 1);
        assert_eq!(habit.last_completed_date(), Some(day1()));
        assert!(habit.is_completed_today(&(day1() + Duration::hours(2))));
    }

    #[test]
    fn mark_completed_twice_double_counts() {
        let mut habit = Habit::new("Stretch", Priority::High, true);
        habit.mark_completed(&day1());
        habit.mark_completed(&day1());
        assert_eq!(habit.streak(), 2);
    }

    #[test]
    fn toggle_twice_same_day_restores_streak() {
        let mut habit = Habit::new("Drink water", Priority::Medium, true);
        let now = day1();

        habit.toggle(&now);
        assert!(habit.is_completed_today(&now));
        assert_eq!(habit.streak(), 1);

        habit.toggle(&now);
        assert!(!habit.is_completed_today(&now));
        assert!(!habit.is_completed());
        assert_eq!(habit.streak(), 0);
        assert!(habit.last_completed_date().is_none());
    }

    #[test]
    fn toggle_off_never_goes_negative() {
        let mut habit = Habit::new("Walk", Priority::Low, false);
        let now = day1();
        habit.toggle(&now);
        habit.streak = 0;
        habit.toggle(&now);
        assert_eq!(habit.streak(), 0);
        assert!(!habit.is_completed_today(&now));
    }

    #[test]
    fn toggle_on_next_day_extends_streak() {
        let mut habit = Habit::new("Walk", Priority::Low, false);
        habit.toggle(&day1());
        let day2 = day1() + Duration::days(1);
        habit.toggle(&day2);
        assert_eq!(habit.streak(), 2);
        assert!(habit.is_completed_today(&day2));
    }

    #[test]
    fn reset_on_next_day_clears_flag_only() {
        let mut habit = Habit::new("Journal", Priority::Medium, true);
        habit.mark_completed(&day1());

        let day2 = day1() + Duration::days(1);
        assert!(habit.reset_for_new_day(&day2));
        assert!(!habit.is_completed());
        assert_eq!(habit.streak(), 1);
        assert_eq!(habit.last_completed_date(), Some(day1()));
    }

    #[test]
    fn reset_same_day_is_a_no_op() {
        let mut habit = Habit::new("Journal", Priority::Medium, true);
        habit.mark_completed(&day1());
        let before = habit.clone();

        assert!(!habit.reset_for_new_day(&(day1() + Duration::hours(3))));
        assert_eq!(habit, before);
    }

    #[test]
    fn reset_without_completion_is_a_no_op() {
        let mut habit = Habit::new("Journal", Priority::Medium, true);
        let before = habit.clone();
        assert!(!habit.reset_for_new_day(&day1()));
        assert_eq!(habit, before);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let mut habit = Habit::new("Drink water", Priority::High, true);
        habit.mark_completed(&day1());
        let json = serde_json::to_value(&habit).unwrap();

        assert_eq!(json["priority"], "high");
        assert_eq!(json["isCompleted"], true);
        assert_eq!(json["isRecurring"], true);
        assert_eq!(json["streak"], 1);
        assert!(json["dueDate"].is_null());
        assert!(json["lastCompletedDate"].is_string());
    }

    #[test]
    fn negative_streak_is_rejected() {
        let json = r#"{"id":"x","name":"n","priority":"low","dueDate":null,
            "isCompleted":false,"isRecurring":false,"streak":-1,"lastCompletedDate":null}"#;
        assert!(serde_json::from_str::<Habit>(json).is_err());
    }
}
