//! Error types for playback sequencing

use cadence_core::TrackId;
use thiserror::Error;

/// Sequencer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Index outside the active playlist
    #[error("Index {index} out of range for playlist of {len} tracks")]
    OutOfRange { index: usize, len: usize },

    /// Active playlist has no tracks
    #[error("Active playlist is empty")]
    EmptyPlaylist,

    /// Current track is missing from the shuffle order
    #[error("Track {0} is missing from the shuffle order")]
    Desync(TrackId),

    /// Shuffle order no longer covers the active playlist
    #[error("Shuffle order has {actual} entries, active playlist has {expected}")]
    StaleShuffleOrder { expected: usize, actual: usize },

    /// Supplied shuffle order is not a permutation of the active playlist
    #[error("Invalid shuffle order: {0}")]
    InvalidShuffleOrder(String),
}

impl SequencerError {
    /// Whether rebuilding the shuffle order may resolve this error
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            SequencerError::Desync(_) | SequencerError::StaleShuffleOrder { .. }
        )
    }
}

/// Result type for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;
