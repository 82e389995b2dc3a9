/// Console configuration
use crate::error::{ConsoleError, Result};
use cadence_playback::{volume, EndOfQueue, SequencerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// JSON array of library records
    #[serde(default = "default_library_path")]
    pub library_path: PathBuf,

    /// Directory holding persisted playlists
    #[serde(default = "default_playlist_dir")]
    pub playlist_dir: PathBuf,

    #[serde(default)]
    pub end_of_queue: EndOfQueue,

    #[serde(default = "default_queue_preview_limit")]
    pub queue_preview_limit: usize,

    /// "Previous" restarts the current track when past this many seconds
    #[serde(default = "default_previous_restart_secs")]
    pub previous_restart_secs: f64,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Initial volume in percent (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            playlist_dir: default_playlist_dir(),
            end_of_queue: EndOfQueue::default(),
            queue_preview_limit: default_queue_preview_limit(),
            previous_restart_secs: default_previous_restart_secs(),
            shuffle_seed: None,
            volume: default_volume(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `cadence.toml`; a missing file is not an error.
    /// Environment variables prefixed with `CADENCE_` override file values
    /// (e.g. `CADENCE_QUEUE_PREVIEW_LIMIT=20`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ConsoleError::Config(format!(
                "Config file not found at {:?}",
                config_path
            )));
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.queue_preview_limit == 0 {
            return Err(ConsoleError::Config(
                "queue_preview_limit must be at least 1".to_string(),
            ));
        }

        if !self.previous_restart_secs.is_finite() || self.previous_restart_secs < 0.0 {
            return Err(ConsoleError::Config(format!(
                "previous_restart_secs must be a non-negative number, got {}",
                self.previous_restart_secs
            )));
        }

        if self.volume > volume::MAX_LEVEL {
            return Err(ConsoleError::Config(format!(
                "volume must be between 0 and {}, got {}",
                volume::MAX_LEVEL,
                self.volume
            )));
        }

        Ok(())
    }

    /// Sequencer settings derived from this configuration
    pub fn sequencer(&self) -> SequencerConfig {
        SequencerConfig {
            end_of_queue: self.end_of_queue,
            shuffle_seed: self.shuffle_seed,
            ..Default::default()
        }
    }
}

// Default values
fn default_library_path() -> PathBuf {
    PathBuf::from("library.json")
}

fn default_playlist_dir() -> PathBuf {
    PathBuf::from(".cadence")
}

fn default_queue_preview_limit() -> usize {
    10
}

fn default_previous_restart_secs() -> f64 {
    3.0
}

fn default_volume() -> u8 {
    volume::DEFAULT_LEVEL
}
