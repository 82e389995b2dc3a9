//! Core error types for Cadence Player

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cadence Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// A library record is missing a required field
    #[error("Invalid track at position {position}: {reason}")]
    InvalidTrack {
        /// Index of the record in the library
        position: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Two library records share an id
    #[error("Duplicate track id: {0}")]
    DuplicateTrackId(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid track error
    pub fn invalid_track(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTrack {
            position,
            reason: reason.into(),
        }
    }
}
