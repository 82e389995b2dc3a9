//! Cadence Player Core
//!
//! Platform-agnostic domain types shared by every Cadence crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Library`
//! - **Load boundary**: `TrackRecord` validation and id assignment
//! - **Error Handling**: Unified `CoreError` and `Result` types
//! - **Display helpers**: `m:ss` time formatting for progress displays
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Library, TrackRecord};
//!
//! let library = Library::from_records(vec![
//!     TrackRecord::new("/music/blue.mp3", "Blue", "Joni Mitchell"),
//!     TrackRecord::new("/music/red.mp3", "Red", "Taylor Swift"),
//! ])
//! .unwrap();
//!
//! assert_eq!(library.len(), 2);
//! assert_eq!(library.tracks()[1].id.as_str(), "song-1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use time::{format_time, progress_percent};
pub use types::{Library, Track, TrackId, TrackRecord};
