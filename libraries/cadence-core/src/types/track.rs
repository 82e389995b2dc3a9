//! Track domain type

use crate::error::{CoreError, Result};
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Audio track
///
/// Immutable once the library is loaded. Field names match the persisted
/// playlist format (`src`, `artist`, `title`, `img`, `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Audio source locator handed to the media element
    pub src: String,

    /// Artist name
    pub artist: String,

    /// Track title
    pub title: String,

    /// Artwork locator
    #[serde(default)]
    pub img: String,

    /// Unique track identifier
    pub id: TrackId,
}

impl Track {
    /// Create a track with an explicit id
    pub fn new(
        id: impl Into<TrackId>,
        src: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            artist: artist.into(),
            title: title.into(),
            img: String::new(),
            id: id.into(),
        }
    }

    /// Set the artwork locator
    #[must_use]
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = img.into();
        self
    }
}

/// Raw library record as supplied by the surrounding markup/data
///
/// The id is optional; records without one get `song-{index}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Audio source locator; required
    #[serde(default)]
    pub src: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Track title; required
    #[serde(default)]
    pub title: String,

    /// Artwork locator
    #[serde(default)]
    pub img: String,

    /// Explicit id, if the record carries one
    #[serde(default)]
    pub id: Option<String>,
}

impl TrackRecord {
    /// Create a record without an id
    pub fn new(src: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            artist: artist.into(),
            title: title.into(),
            img: String::new(),
            id: None,
        }
    }

    /// Validate the record and turn it into a `Track`
    ///
    /// `position` is the record's index in the library.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidTrack` when `src` or `title` is blank or the
    /// supplied id is empty.
    pub fn into_track(self, position: usize) -> Result<Track> {
        if self.src.trim().is_empty() {
            return Err(CoreError::invalid_track(position, "missing source locator"));
        }
        if self.title.trim().is_empty() {
            return Err(CoreError::invalid_track(position, "missing title"));
        }

        let id = match self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(CoreError::invalid_track(position, "empty id"));
            }
            Some(id) => TrackId::new(id),
            None => TrackId::for_position(position),
        };

        Ok(Track {
            src: self.src,
            artist: self.artist,
            title: self.title,
            img: self.img,
            id,
        })
    }
}
