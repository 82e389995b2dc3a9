//! User playlists
//!
//! Named, ordered track lists persisted through a [`KeyValueStore`] under
//! [`PLAYLISTS_KEY`] as a JSON object:
//!
//! ```json
//! { "Road trip": [ { "src": "...", "artist": "...", "title": "...", "img": "...", "id": "song-3" } ] }
//! ```
//!
//! Object order is creation order.

use crate::backend::KeyValueStore;
use crate::error::{Result, StorageError};
use cadence_core::{Track, TrackId};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::{info, warn};

/// Key the playlist map is stored under
pub const PLAYLISTS_KEY: &str = "userPlaylists";

/// A user-named playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|track| &track.id == id)
    }
}

/// Persisted form: an order-preserving map of name → tracks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PlaylistMap(Vec<Playlist>);

impl Serialize for PlaylistMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for playlist in &self.0 {
            map.serialize_entry(&playlist.name, &playlist.tracks)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlaylistMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PlaylistMapVisitor;

        impl<'de> Visitor<'de> for PlaylistMapVisitor {
            type Value = PlaylistMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of playlist names to track lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut playlists: Vec<Playlist> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, tracks)) = access.next_entry::<String, Vec<Track>>()? {
                    // Last value wins for repeated keys
                    playlists.retain(|p| p.name != name);
                    playlists.push(Playlist { name, tracks });
                }
                Ok(PlaylistMap(playlists))
            }
        }

        deserializer.deserialize_map(PlaylistMapVisitor)
    }
}

/// Playlist store with write-through persistence
///
/// Every successful mutation is written to the backend before returning.
#[derive(Debug)]
pub struct PlaylistStore<S: KeyValueStore> {
    backend: S,
    playlists: PlaylistMap,
}

impl<S: KeyValueStore> PlaylistStore<S> {
    /// Load playlists from `backend`
    ///
    /// Unreadable persisted data is logged and replaced by an empty store.
    ///
    /// # Errors
    /// Only backend read failures are returned.
    pub fn open(backend: S) -> Result<Self> {
        let playlists = match backend.get(PLAYLISTS_KEY)? {
            None => PlaylistMap::default(),
            Some(raw) => match serde_json::from_str::<PlaylistMap>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable playlist data");
                    PlaylistMap::default()
                }
            },
        };

        info!(count = playlists.0.len(), "Playlists loaded");
        Ok(Self { backend, playlists })
    }

    /// Create an empty playlist
    ///
    /// The name is trimmed before use.
    pub fn create(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidName);
        }
        if self.get(name).is_some() {
            return Err(StorageError::DuplicateName(name.to_string()));
        }

        let mut next = self.playlists.clone();
        next.0.push(Playlist {
            name: name.to_string(),
            tracks: Vec::new(),
        });
        self.commit(next)?;

        info!(playlist = name, "Playlist created");
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<Playlist> {
        let index = self.index_of(name)?;
        let mut next = self.playlists.clone();
        let removed = next.0.remove(index);
        self.commit(next)?;

        info!(playlist = %removed.name, "Playlist deleted");
        Ok(removed)
    }

    /// Append `track` to the playlist
    ///
    /// # Errors
    /// `AlreadyPresent` if a track with the same id is already there.
    pub fn add_track(&mut self, name: &str, track: Track) -> Result<()> {
        let index = self.index_of(name)?;
        let playlist = &self.playlists.0[index];
        if playlist.contains(&track.id) {
            return Err(StorageError::AlreadyPresent {
                playlist: playlist.name.clone(),
                track_id: track.id,
            });
        }

        let mut next = self.playlists.clone();
        info!(playlist = %playlist.name, track_id = %track.id, "Adding track to playlist");
        next.0[index].tracks.push(track);
        self.commit(next)
    }

    pub fn remove_track(&mut self, name: &str, track_id: &TrackId) -> Result<Track> {
        let index = self.index_of(name)?;
        let playlist = &self.playlists.0[index];
        let position = playlist
            .tracks
            .iter()
            .position(|track| &track.id == track_id)
            .ok_or_else(|| StorageError::TrackNotFound {
                playlist: playlist.name.clone(),
                track_id: track_id.clone(),
            })?;

        let mut next = self.playlists.clone();
        let removed = next.0[index].tracks.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        let name = name.trim();
        self.playlists.0.iter().find(|p| p.name == name)
    }

    /// All playlists in creation order
    pub fn list(&self) -> &[Playlist] {
        &self.playlists.0
    }

    pub fn len(&self) -> usize {
        self.playlists.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.0.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.playlists
            .0
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| StorageError::PlaylistNotFound(name.to_string()))
    }

    /// Write `next` to the backend, then make it the in-memory state
    ///
    /// On failure the store keeps its previous contents.
    fn commit(&mut self, next: PlaylistMap) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        self.backend.set(PLAYLISTS_KEY, raw)?;
        self.playlists = next;
        Ok(())
    }
}
