//! Cadence Player - Playback Sequencing
//!
//! Platform-agnostic playback sequencing for Cadence Player.
//!
//! This crate provides:
//! - Active playlist ownership and track selection
//! - Next/previous resolution under shuffle and repeat
//! - Fisher-Yates shuffle orders, rebuilt when they fall out of sync
//! - Repeat modes (Off, All, One)
//! - Track-ended handling with a configurable end-of-queue policy
//! - Lazy queue preview
//! - Search filtering
//! - Logarithmic volume control
//!
//! # Architecture
//!
//! `cadence-playback` decides *which* track plays; it never plays anything.
//! Media output, rendering and persistence are collaborators that act on
//! the sequencer's decisions. With the `wasm` feature the sequencer is also
//! exported to JavaScript.
//!
//! # Example: Basic Sequencing
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{Direction, PlaybackSequencer, RepeatMode};
//!
//! let mut sequencer = PlaybackSequencer::default();
//! sequencer.set_active_playlist(vec![
//!     Track::new("a", "/music/a.mp3", "Alpha", "Artist"),
//!     Track::new("b", "/music/b.mp3", "Beta", "Artist"),
//! ]);
//!
//! sequencer.select_index(1).unwrap();
//! sequencer.set_repeat_mode(RepeatMode::All);
//!
//! // Resolve without committing, then commit
//! assert_eq!(sequencer.advance(Direction::Next).unwrap(), 0);
//! let track = sequencer.step(Direction::Next).unwrap();
//! assert_eq!(track.title, "Alpha");
//! ```
//!
//! # Example: Queue Preview
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::PlaybackSequencer;
//!
//! let mut sequencer = PlaybackSequencer::default();
//! sequencer.set_active_playlist(vec![
//!     Track::new("a", "/music/a.mp3", "Alpha", "Artist"),
//!     Track::new("b", "/music/b.mp3", "Beta", "Artist"),
//!     Track::new("c", "/music/c.mp3", "Gamma", "Artist"),
//! ]);
//! sequencer.select_index(0).unwrap();
//!
//! let upcoming: Vec<_> = sequencer.queue_preview(5).map(|t| t.title.as_str()).collect();
//! assert_eq!(upcoming, vec!["Beta", "Gamma"]);
//! ```

mod error;
mod queue;
pub mod search;
mod sequencer;
pub mod shuffle;
pub mod types;
pub mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{Result, SequencerError};
pub use queue::QueuePreview;
pub use search::filter;
pub use sequencer::PlaybackSequencer;
pub use types::{
    Direction, EndOfQueue, PlaybackCursor, RepeatMode, SequencerConfig, TrackEnd,
};
pub use volume::Volume;
