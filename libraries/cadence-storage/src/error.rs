/// Storage error types
use cadence_core::TrackId;
use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by the playlist store and its backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// A playlist with this name already exists
    #[error("A playlist named '{0}' already exists")]
    DuplicateName(String),

    /// Playlist names must contain something other than whitespace
    #[error("Playlist name cannot be empty")]
    InvalidName,

    /// The track is already in the playlist
    #[error("Track {track_id} is already in playlist '{playlist}'")]
    AlreadyPresent { playlist: String, track_id: TrackId },

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Track {track_id} not found in playlist '{playlist}'")]
    TrackNotFound { playlist: String, track_id: TrackId },

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether the error is a user-facing rejection rather than a backend failure
    pub fn is_user_error(&self) -> bool {
        !matches!(self, StorageError::Serialization(_) | StorageError::Io(_))
    }
}
