/// Console error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Library error: {0}")]
    Library(#[from] cadence_core::CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] cadence_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}
