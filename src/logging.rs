//! Logger setup.
//!
//! Records go to the systemd user journal (`journalctl --user -t daily-habits -f`).
//! This crate logs at info (debug when enabled in the config); everything else
//! at warn.

use crate::error::LoggingError;
use log::{LevelFilter, Log, Metadata, Record};
use std::path::Path;
use systemd_journal_logger::JournalLog;

const SYSLOG_IDENTIFIER: &str = "daily-habits";
const JOURNAL_SOCKET: &str = "/run/systemd/journal/socket";

struct Filtered<L> {
    inner: L,
    own_level: LevelFilter,
}

impl<L: Log> Filtered<L> {
    fn new(inner: L, debug: bool) -> Self {
        let own_level = if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self { inner, own_level }
    }
}

impl<L: Log> Log for Filtered<L> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.target().starts_with("daily_habits") {
            metadata.level() <= self.own_level
        } else {
            metadata.level() <= LevelFilter::Warn
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Installs the global logger. Call once, before anything logs.
pub fn init(debug: bool) -> Result<(), LoggingError> {
    if !Path::new(JOURNAL_SOCKET).exists() {
        return Err(LoggingError::NoJournal);
    }

    let journal = JournalLog::new()?.with_syslog_identifier(SYSLOG_IDENTIFIER.to_string());
    log::set_boxed_logger(Box::new(Filtered::new(journal, debug)))?;

    // Global max must allow debug so the per-target filter decides.
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, MetadataBuilder};

    struct Discard;

    impl Log for Discard {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, _record: &Record) {}

        fn flush(&self) {}
    }

    fn metadata(target: &str, level: Level) -> Metadata<'_> {
        MetadataBuilder::new().target(target).level(level).build()
    }

    #[test]
    fn own_records_pass_at_info() {
        let logger = Filtered::new(Discard, false);
        assert!(logger.enabled(&metadata("daily_habits::store", Level::Info)));
        assert!(!logger.enabled(&metadata("daily_habits::store", Level::Debug)));
    }

    #[test]
    fn debug_flag_lets_own_debug_through() {
        let logger = Filtered::new(Discard, true);
        assert!(logger.enabled(&metadata("daily_habits::store", Level::Debug)));
        assert!(!logger.enabled(&metadata("daily_habits::store", Level::Trace)));
    }

    #[test]
    fn other_crates_only_warn() {
        let logger = Filtered::new(Discard, true);
        assert!(logger.enabled(&metadata("gtk4", Level::Warn)));
        assert!(!logger.enabled(&metadata("gtk4", Level::Info)));
    }

    #[test]
    fn missing_journal_is_reported() {
        let message = LoggingError::NoJournal.to_string();
        assert_eq!(message, "systemd journal is not available");
    }
}
