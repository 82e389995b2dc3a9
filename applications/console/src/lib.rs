//! Cadence console player
//!
//! Wires the playback sequencer, the playlist store and a text front end
//! into an event-driven session.
//!
//! This library exposes the session components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod media;
pub mod render;
pub mod session;

// Re-export commonly used types for convenience
pub use commands::parse_command;
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use media::{LogMedia, MediaOutput};
pub use render::{Notice, Renderer, TextRenderer};
pub use session::{Session, SessionSettings, UiEvent, View};

use cadence_core::Library;

/// Read the library file named by the configuration
pub fn load_library(config: &ConsoleConfig) -> Result<Library> {
    let json = std::fs::read_to_string(&config.library_path)?;
    let library = Library::from_json(&json)?;
    tracing::info!(
        path = %config.library_path.display(),
        tracks = library.len(),
        "Library loaded"
    );
    Ok(library)
}

impl From<&ConsoleConfig> for SessionSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            sequencer: config.sequencer(),
            queue_preview_limit: config.queue_preview_limit,
            previous_restart_secs: config.previous_restart_secs,
            volume: config.volume,
        }
    }
}
