use thiserror::Error;

/// Errors raised by a preference store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not find data directory")]
    NoDataDirectory,
}

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while installing the logger.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("systemd journal is not available")]
    NoJournal,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger already set: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}
