//! Cadence Player - Playlist Storage
//!
//! User-created playlists with write-through persistence.
//!
//! The store talks to persistence through the [`KeyValueStore`] trait,
//! matching a browser's local storage. Two backends ship with the crate:
//! - [`MemoryStore`] for tests and embedding
//! - [`FileStore`] writing one JSON file per key
//!
//! # Example
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_storage::{MemoryStore, PlaylistStore, StorageError};
//!
//! let mut store = PlaylistStore::open(MemoryStore::new()).unwrap();
//! store.create("Road trip").unwrap();
//! store
//!     .add_track("Road trip", Track::new("song-0", "/music/a.mp3", "Alpha", "Artist"))
//!     .unwrap();
//!
//! let again = store.add_track("Road trip", Track::new("song-0", "/music/a.mp3", "Alpha", "Artist"));
//! assert!(matches!(again, Err(StorageError::AlreadyPresent { .. })));
//! ```

mod backend;
mod error;
mod playlists;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{Result, StorageError};
pub use playlists::{Playlist, PlaylistStore, PLAYLISTS_KEY};
