//! Queue preview
//!
//! Read-only projection of the tracks that will play after the current one.
//! Computed lazily from the sequencer's state, never stored.
//!
//! ```text
//! Order:     [ A  B  C  D  E ]
//! Current:         ^
//! Preview:            C  D  E            (repeat off)
//! Preview:            C  D  E  A         (repeat all)
//! ```

use cadence_core::{Track, TrackId};
use std::collections::HashMap;

/// Order the preview walks through
#[derive(Debug, Clone, Copy)]
pub(crate) enum PreviewOrder<'a> {
    /// Active playlist order
    Playlist,

    /// Shuffle order, mapped back to playlist positions
    Shuffled {
        ids: &'a [TrackId],
        positions: &'a HashMap<TrackId, usize>,
    },
}

impl PreviewOrder<'_> {
    fn len(&self, playlist: &[Track]) -> usize {
        match self {
            PreviewOrder::Playlist => playlist.len(),
            PreviewOrder::Shuffled { ids, .. } => ids.len(),
        }
    }
}

/// Lazy, finite iterator over upcoming tracks
///
/// Cloning restarts the walk from the same point.
#[derive(Debug, Clone)]
pub struct QueuePreview<'a> {
    playlist: &'a [Track],
    order: PreviewOrder<'a>,

    /// Position in `order` of the next candidate
    next: usize,

    /// Positions still to visit
    remaining: usize,

    /// Entries still allowed by the caller's limit
    left: usize,

    /// Track that must never appear (the current one)
    skip: Option<&'a TrackId>,
}

impl<'a> QueuePreview<'a> {
    /// Preview starting after `start` in `order`
    ///
    /// With `start = None` the walk covers the whole order from its first
    /// entry. `wrap` continues from the beginning of the order up to (but
    /// excluding) `start`.
    pub(crate) fn new(
        playlist: &'a [Track],
        order: PreviewOrder<'a>,
        start: Option<usize>,
        wrap: bool,
        limit: usize,
        skip: Option<&'a TrackId>,
    ) -> Self {
        let len = order.len(playlist);
        let (next, remaining) = match start {
            Some(position) if position < len => {
                let remaining = if wrap { len - 1 } else { len - 1 - position };
                (position + 1, remaining)
            }
            _ => (0, len),
        };

        Self {
            playlist,
            order,
            next,
            remaining,
            left: limit,
            skip,
        }
    }

    /// Empty preview
    pub(crate) fn empty(playlist: &'a [Track]) -> Self {
        Self::new(playlist, PreviewOrder::Playlist, None, false, 0, None)
    }

    fn resolve(&self, position: usize) -> Option<&'a Track> {
        match self.order {
            PreviewOrder::Playlist => self.playlist.get(position),
            PreviewOrder::Shuffled { ids, positions } => ids
                .get(position)
                .and_then(|id| positions.get(id))
                .and_then(|&index| self.playlist.get(index)),
        }
    }
}

impl<'a> Iterator for QueuePreview<'a> {
    type Item = &'a Track;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.order.len(self.playlist);

        while self.left > 0 && self.remaining > 0 {
            let position = self.next % len;
            self.next += 1;
            self.remaining -= 1;

            let Some(track) = self.resolve(position) else {
                continue;
            };
            if self.skip.is_some_and(|id| *id == track.id) {
                continue;
            }

            self.left -= 1;
            return Some(track);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.left.min(self.remaining)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("/music/{}.mp3", id), id.to_uppercase(), "Artist")
    }

    fn playlist() -> Vec<Track> {
        ["a", "b", "c", "d", "e"].iter().map(|id| create_test_track(id)).collect()
    }

    fn ids<'a>(preview: impl Iterator<Item = &'a Track>) -> Vec<&'a str> {
        preview.map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn entries_after_current_without_wrap() {
        let tracks = playlist();
        let preview = QueuePreview::new(&tracks, PreviewOrder::Playlist, Some(1), false, 10, None);
        assert_eq!(ids(preview), vec!["c", "d", "e"]);
    }

    #[test]
    fn wraps_up_to_current() {
        let tracks = playlist();
        let preview = QueuePreview::new(&tracks, PreviewOrder::Playlist, Some(1), true, 10, None);
        assert_eq!(ids(preview), vec!["c", "d", "e", "a"]);
    }

    #[test]
    fn limit_is_respected() {
        let tracks = playlist();
        let preview = QueuePreview::new(&tracks, PreviewOrder::Playlist, Some(0), true, 2, None);
        assert_eq!(ids(preview), vec!["b", "c"]);
    }

    #[test]
    fn no_selection_starts_at_first_entry() {
        let tracks = playlist();
        let preview = QueuePreview::new(&tracks, PreviewOrder::Playlist, None, true, 10, None);
        assert_eq!(ids(preview), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn last_entry_without_wrap_is_empty() {
        let tracks = playlist();
        let mut preview =
            QueuePreview::new(&tracks, PreviewOrder::Playlist, Some(4), false, 10, None);
        assert!(preview.next().is_none());
    }

    #[test]
    fn shuffled_order_maps_back_to_tracks() {
        let tracks = playlist();
        let order: Vec<TrackId> = ["c", "a", "e", "b", "d"].iter().map(|id| TrackId::new(*id)).collect();
        let positions: HashMap<TrackId, usize> = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        let preview = QueuePreview::new(
            &tracks,
            PreviewOrder::Shuffled { ids: &order, positions: &positions },
            Some(1),
            false,
            10,
            None,
        );
        assert_eq!(ids(preview), vec!["e", "b", "d"]);
    }

    #[test]
    fn skipped_track_never_appears() {
        let tracks = playlist();
        let skip = TrackId::new("c");
        let preview =
            QueuePreview::new(&tracks, PreviewOrder::Playlist, None, false, 10, Some(&skip));
        assert_eq!(ids(preview), vec!["a", "b", "d", "e"]);
    }

    #[test]
    fn clone_restarts_from_same_point() {
        let tracks = playlist();
        let mut preview =
            QueuePreview::new(&tracks, PreviewOrder::Playlist, Some(0), false, 10, None);
        let snapshot = preview.clone();
        preview.next();
        preview.next();
        assert_eq!(ids(snapshot), vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn empty_preview_yields_nothing() {
        let tracks = playlist();
        assert_eq!(QueuePreview::empty(&tracks).count(), 0);
    }
}
