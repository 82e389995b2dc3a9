//! Library of all tracks available to the player

use crate::error::{CoreError, Result};
use crate::types::{Track, TrackId, TrackRecord};
use std::collections::HashSet;

/// Ordered, validated collection of every track
///
/// Loaded once at start-up and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    tracks: Vec<Track>,
}

impl Library {
    /// Build a library from raw records, assigning ids where missing
    ///
    /// # Errors
    /// Fails on the first invalid record or duplicate id.
    pub fn from_records(records: Vec<TrackRecord>) -> Result<Self> {
        let tracks = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_track(position))
            .collect::<Result<Vec<_>>>()?;

        Self::from_tracks(tracks)
    }

    /// Build a library from already constructed tracks
    ///
    /// # Errors
    /// Returns `CoreError::DuplicateTrackId` if two tracks share an id.
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(&track.id) {
                return Err(CoreError::DuplicateTrackId(track.id.to_string()));
            }
        }

        Ok(Self { tracks })
    }

    /// Parse a JSON array of `{src, artist, title, img, id?}` records
    ///
    /// # Errors
    /// Malformed JSON, or any error `from_records` reports.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<TrackRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Every track, in library order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the library has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Owned copy of every track, in library order
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}
