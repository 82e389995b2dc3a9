//! Core types for playback sequencing

use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the active playlist ends
    #[default]
    Off,

    /// Loop the entire active playlist
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off → All → One → Off
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Navigation direction for next/previous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// What happens when the last track ends with repeat off and shuffle off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfQueue {
    /// Stop playback and zero the progress display
    #[default]
    Stop,

    /// Wrap around to the first track
    Wrap,
}

/// Snapshot of the sequencer's position and modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    /// Index into the active playlist, `None` when nothing is selected
    pub index: Option<usize>,

    /// Whether next/previous resolve through the shuffle order
    pub is_shuffling: bool,

    /// Current repeat mode
    pub repeat: RepeatMode,
}

/// Outcome of a track finishing naturally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackEnd {
    /// Restart the track at this index
    Replay(usize),

    /// The track at this index is now current; load and play it
    Advance(usize),

    /// Stop playback and reset progress to 0:00
    Stop,
}

/// Configuration for the playback sequencer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Last-track policy when repeat and shuffle are off (default: Stop)
    pub end_of_queue: EndOfQueue,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Fixed seed for the shuffle RNG, for reproducible sessions
    pub shuffle_seed: Option<u64>,
}
