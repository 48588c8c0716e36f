pub mod calendar;
pub mod config;
pub mod error;
pub mod habit;
pub mod logging;
pub mod presentation;
pub mod storage;
pub mod store;

pub use habit::{Habit, Priority};
pub use storage::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use store::HabitStore;
