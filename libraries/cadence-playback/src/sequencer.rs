//! Playback sequencer - core orchestration
//!
//! Owns the active playlist, the shuffle order derived from it and the
//! playback cursor. Every UI event that changes what plays goes through one
//! of its methods; media, rendering and persistence act on the decisions it
//! returns.

use crate::{
    error::{Result, SequencerError},
    queue::{PreviewOrder, QueuePreview},
    shuffle::{check_permutation, shuffle_order},
    types::{Direction, EndOfQueue, PlaybackCursor, RepeatMode, SequencerConfig, TrackEnd},
};
use cadence_core::{Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Decides which track of the active playlist plays next
///
/// Resolution (`advance`) and commit (`select_index`) are separate so the
/// choice can be inspected without touching state; `step` combines them
/// with desync recovery.
#[derive(Debug)]
pub struct PlaybackSequencer {
    /// Tracks currently eligible for playback
    playlist: Vec<Track>,

    /// Playlist position of every track id
    positions: HashMap<TrackId, usize>,

    /// Permutation of the playlist's ids; empty unless shuffling
    shuffle_order: Vec<TrackId>,

    cursor: PlaybackCursor,
    end_of_queue: EndOfQueue,
    rng: StdRng,
}

impl PlaybackSequencer {
    /// Create a sequencer with an empty active playlist
    pub fn new(config: SequencerConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            playlist: Vec::new(),
            positions: HashMap::new(),
            shuffle_order: Vec::new(),
            cursor: PlaybackCursor {
                index: None,
                is_shuffling: false,
                repeat: config.repeat,
            },
            end_of_queue: config.end_of_queue,
            rng,
        }
    }

    // ===== Active Playlist =====

    /// Replace the active playlist
    ///
    /// Clears the selection. While shuffling, a new shuffle order is drawn
    /// for the new list. Later duplicates of a track id are dropped.
    pub fn set_active_playlist(&mut self, tracks: Vec<Track>) {
        let mut positions = HashMap::with_capacity(tracks.len());
        let mut playlist = Vec::with_capacity(tracks.len());

        for track in tracks {
            if positions.contains_key(&track.id) {
                warn!(track_id = %track.id, "Dropping duplicate track from active playlist");
                continue;
            }
            positions.insert(track.id.clone(), playlist.len());
            playlist.push(track);
        }

        self.playlist = playlist;
        self.positions = positions;
        self.cursor.index = None;

        if self.cursor.is_shuffling {
            self.rebuild_shuffle_order();
        }

        debug!(len = self.playlist.len(), "Active playlist replaced");
    }

    pub fn active_playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Position of a track in the active playlist
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    // ===== Selection =====

    /// Make the track at `index` current
    ///
    /// This is the only way a track becomes current.
    pub fn select_index(&mut self, index: usize) -> Result<&Track> {
        let len = self.playlist.len();
        if index >= len {
            return Err(SequencerError::OutOfRange { index, len });
        }

        self.cursor.index = Some(index);
        debug!(index, track_id = %self.playlist[index].id, "Track selected");
        Ok(&self.playlist[index])
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.index.and_then(|index| self.playlist.get(index))
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    // ===== Navigation =====

    /// Resolve the playlist index `direction` leads to, without committing
    ///
    /// - Next with repeat One stays on the current index.
    /// - While shuffling, steps through the shuffle order by track id.
    /// - Otherwise steps through the playlist, wrapping at both ends.
    ///
    /// With nothing selected, Next resolves to the first entry of the
    /// effective order and Previous to the last.
    pub fn advance(&self, direction: Direction) -> Result<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(SequencerError::EmptyPlaylist);
        }

        let shuffled = self.cursor.is_shuffling && !self.shuffle_order.is_empty();
        if shuffled {
            self.check_shuffle_order()?;
        }

        let Some(current) = self.cursor.index else {
            return Ok(self.entry_index(direction, shuffled));
        };

        if direction == Direction::Next && self.cursor.repeat == RepeatMode::One {
            return Ok(current);
        }

        if shuffled {
            let current_id = &self.playlist[current].id;
            let position = self
                .shuffle_order
                .iter()
                .position(|id| id == current_id)
                .ok_or_else(|| SequencerError::Desync(current_id.clone()))?;

            let target = &self.shuffle_order[wrap_step(position, self.shuffle_order.len(), direction)];
            return self
                .position_of(target)
                .ok_or_else(|| SequencerError::Desync(target.clone()));
        }

        Ok(wrap_step(current, len, direction))
    }

    /// Resolve and commit a move in `direction`
    ///
    /// A desynchronised shuffle order is rebuilt once; if the move still
    /// cannot be resolved, playback restarts from the first track.
    pub fn step(&mut self, direction: Direction) -> Result<&Track> {
        let index = self.resolve_with_recovery(direction, Self::rebuild_shuffle_order)?;
        self.select_index(index)
    }

    /// Decide what happens when the current track finishes
    ///
    /// Repeat One replays; repeat All or shuffle advance circularly; with
    /// both off, the last track either stops or wraps according to the
    /// configured `EndOfQueue` policy.
    pub fn on_track_ended(&mut self) -> TrackEnd {
        let Some(current) = self.cursor.index else {
            return TrackEnd::Stop;
        };

        if self.cursor.repeat == RepeatMode::One {
            return TrackEnd::Replay(current);
        }

        let at_last = current + 1 >= self.playlist.len();
        if self.cursor.repeat == RepeatMode::Off
            && !self.cursor.is_shuffling
            && at_last
            && self.end_of_queue == EndOfQueue::Stop
        {
            debug!(index = current, "End of active playlist reached");
            return TrackEnd::Stop;
        }

        if let Err(err) = self.step(Direction::Next).map(|_| ()) {
            warn!(error = %err, "Could not advance after track end");
            return TrackEnd::Stop;
        }

        match self.cursor.index {
            Some(index) => TrackEnd::Advance(index),
            None => TrackEnd::Stop,
        }
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle on or off; returns the new state
    ///
    /// The current selection is left alone, only future moves change.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.cursor.is_shuffling = !self.cursor.is_shuffling;

        if self.cursor.is_shuffling {
            self.rebuild_shuffle_order();
        } else {
            self.shuffle_order.clear();
        }

        debug!(shuffling = self.cursor.is_shuffling, "Shuffle toggled");
        self.cursor.is_shuffling
    }

    /// Enable shuffle with a previously saved order
    ///
    /// # Errors
    /// `InvalidShuffleOrder` unless `order` is a permutation of the active
    /// playlist's ids.
    pub fn restore_shuffle_order(&mut self, order: Vec<TrackId>) -> Result<()> {
        check_permutation(&self.playlist, &order).map_err(SequencerError::InvalidShuffleOrder)?;

        self.shuffle_order = order;
        self.cursor.is_shuffling = true;
        Ok(())
    }

    pub fn shuffle_order(&self) -> &[TrackId] {
        &self.shuffle_order
    }

    pub fn is_shuffling(&self) -> bool {
        self.cursor.is_shuffling
    }

    /// Advance the repeat mode: Off → All → One → Off
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.cursor.repeat = self.cursor.repeat.cycled();
        debug!(repeat = ?self.cursor.repeat, "Repeat mode cycled");
        self.cursor.repeat
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.cursor.repeat = mode;
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.cursor.repeat
    }

    // ===== Queue Preview =====

    /// Up to `limit` tracks that follow the current one
    ///
    /// Walks the same order `advance` uses. Wraps to the start when repeat
    /// is All (or, with repeat off, when the end-of-queue policy wraps).
    /// Never yields the current track.
    pub fn queue_preview(&self, limit: usize) -> QueuePreview<'_> {
        if self.playlist.is_empty() || limit == 0 {
            return QueuePreview::empty(&self.playlist);
        }

        let wrap = match self.cursor.repeat {
            RepeatMode::All => true,
            RepeatMode::Off => self.end_of_queue == EndOfQueue::Wrap,
            RepeatMode::One => false,
        };
        let current = self.current_track().map(|track| &track.id);

        if !(self.cursor.is_shuffling && !self.shuffle_order.is_empty()) {
            return QueuePreview::new(
                &self.playlist,
                PreviewOrder::Playlist,
                self.cursor.index,
                wrap,
                limit,
                current,
            );
        }

        let order = PreviewOrder::Shuffled {
            ids: &self.shuffle_order,
            positions: &self.positions,
        };
        let start = current.and_then(|id| self.shuffle_order.iter().position(|entry| entry == id));

        // Out of sync: walk the whole order, still hiding the current track
        QueuePreview::new(&self.playlist, order, start, wrap, limit, current)
    }

    // ===== Internal =====

    /// `advance`, retried once after `rebuild` when the order is out of sync
    ///
    /// Falls back to index 0 if the retry still reports a desync.
    fn resolve_with_recovery(
        &mut self,
        direction: Direction,
        rebuild: impl FnOnce(&mut Self),
    ) -> Result<usize> {
        match self.advance(direction) {
            Err(err) if err.is_desync() => {
                warn!(error = %err, "Shuffle order out of sync, rebuilding");
                rebuild(self);
            }
            resolved => return resolved,
        }

        match self.advance(direction) {
            Err(err) if err.is_desync() => {
                warn!(error = %err, "Shuffle order still out of sync, resetting to start");
                Ok(0)
            }
            resolved => resolved,
        }
    }

    fn rebuild_shuffle_order(&mut self) {
        self.shuffle_order = shuffle_order(&self.playlist, &mut self.rng);
    }

    fn check_shuffle_order(&self) -> Result<()> {
        if self.shuffle_order.len() == self.playlist.len() {
            Ok(())
        } else {
            Err(SequencerError::StaleShuffleOrder {
                expected: self.playlist.len(),
                actual: self.shuffle_order.len(),
            })
        }
    }

    /// First (Next) or last (Previous) index of the effective order
    fn entry_index(&self, direction: Direction, shuffled: bool) -> usize {
        let last = self.playlist.len() - 1;
        if !shuffled {
            return match direction {
                Direction::Next => 0,
                Direction::Previous => last,
            };
        }

        let entry = match direction {
            Direction::Next => self.shuffle_order.first(),
            Direction::Previous => self.shuffle_order.last(),
        };
        entry.and_then(|id| self.position_of(id)).unwrap_or(0)
    }

    /// Test hook: corrupt the shuffle order to exercise recovery
    #[cfg(test)]
    pub(crate) fn shuffle_order_mut(&mut self) -> &mut Vec<TrackId> {
        &mut self.shuffle_order
    }
}

impl Default for PlaybackSequencer {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

/// Step `index` one place in `direction`, wrapping modulo `len`
fn wrap_step(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Next => (index + 1) % len,
        Direction::Previous => (index + len - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("/music/{}.mp3", id), id.to_uppercase(), "Artist")
    }

    fn abcd() -> Vec<Track> {
        ["a", "b", "c", "d"].iter().map(|id| create_test_track(id)).collect()
    }

    fn sequencer_with(tracks: Vec<Track>) -> PlaybackSequencer {
        let mut sequencer = PlaybackSequencer::new(SequencerConfig {
            shuffle_seed: Some(7),
            ..Default::default()
        });
        sequencer.set_active_playlist(tracks);
        sequencer
    }

    fn ids(order: &[&str]) -> Vec<TrackId> {
        order.iter().map(|id| TrackId::new(*id)).collect()
    }

    #[test]
    fn new_sequencer_has_no_selection() {
        let sequencer = PlaybackSequencer::default();
        assert!(sequencer.current_track().is_none());
        assert_eq!(sequencer.cursor(), PlaybackCursor::default());
    }

    #[test]
    fn select_index_out_of_range() {
        let mut sequencer = sequencer_with(abcd());
        let err = sequencer.select_index(4).unwrap_err();
        assert_eq!(err, SequencerError::OutOfRange { index: 4, len: 4 });
        assert!(sequencer.current_index().is_none());
    }

    #[test]
    fn set_active_playlist_resets_selection() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(2).unwrap();

        sequencer.set_active_playlist(abcd());
        assert!(sequencer.current_index().is_none());
    }

    #[test]
    fn duplicate_ids_in_active_playlist_are_dropped() {
        let mut tracks = abcd();
        tracks.push(create_test_track("b"));
        let sequencer = sequencer_with(tracks);
        assert_eq!(sequencer.active_playlist().len(), 4);
    }

    #[test]
    fn advance_wraps_linearly() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.set_repeat_mode(RepeatMode::All);

        sequencer.select_index(1).unwrap();
        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 2);

        sequencer.select_index(3).unwrap();
        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 0);

        sequencer.select_index(0).unwrap();
        assert_eq!(sequencer.advance(Direction::Previous).unwrap(), 3);
    }

    #[test]
    fn advance_does_not_mutate() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(1).unwrap();
        sequencer.advance(Direction::Next).unwrap();
        assert_eq!(sequencer.current_index(), Some(1));
    }

    #[test]
    fn repeat_one_next_stays_put() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.set_repeat_mode(RepeatMode::One);
        sequencer.select_index(2).unwrap();

        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 2);
        assert_eq!(sequencer.advance(Direction::Previous).unwrap(), 1);
    }

    #[test]
    fn advance_without_selection() {
        let sequencer = sequencer_with(abcd());
        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 0);
        assert_eq!(sequencer.advance(Direction::Previous).unwrap(), 3);
    }

    #[test]
    fn advance_on_empty_playlist() {
        let sequencer = PlaybackSequencer::default();
        assert_eq!(
            sequencer.advance(Direction::Next).unwrap_err(),
            SequencerError::EmptyPlaylist
        );
    }

    #[test]
    fn shuffled_advance_follows_order_by_id() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.restore_shuffle_order(ids(&["c", "a", "d", "b"])).unwrap();
        sequencer.select_index(0).unwrap(); // a

        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 3); // d
        assert_eq!(sequencer.advance(Direction::Previous).unwrap(), 2); // c
    }

    #[test]
    fn shuffled_advance_wraps_around_order() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.restore_shuffle_order(ids(&["c", "a", "d", "b"])).unwrap();
        sequencer.select_index(1).unwrap(); // b, last in order

        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 2); // c
    }

    #[test]
    fn shuffled_advance_without_selection_uses_order_ends() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.restore_shuffle_order(ids(&["c", "a", "d", "b"])).unwrap();

        assert_eq!(sequencer.advance(Direction::Next).unwrap(), 2); // c
        assert_eq!(sequencer.advance(Direction::Previous).unwrap(), 1); // b
    }

    #[test]
    fn missing_current_track_is_a_desync() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.toggle_shuffle();
        sequencer.select_index(0).unwrap();
        let order = sequencer.shuffle_order_mut();
        let slot = order.iter().position(|id| id.as_str() == "a").unwrap();
        order[slot] = TrackId::new("zzz");

        let err = sequencer.advance(Direction::Next).unwrap_err();
        assert_eq!(err, SequencerError::Desync(TrackId::new("a")));
    }

    #[test]
    fn step_recovers_from_desync() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.toggle_shuffle();
        sequencer.select_index(0).unwrap();
        sequencer.shuffle_order_mut().truncate(2);

        let track = sequencer.step(Direction::Next).unwrap().clone();
        assert_eq!(sequencer.shuffle_order().len(), 4);
        assert_ne!(track.id.as_str(), "a");
    }

    #[test]
    fn unrecoverable_desync_resets_to_start() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.toggle_shuffle();
        sequencer.select_index(2).unwrap();
        sequencer.shuffle_order_mut().truncate(1);

        let mut rebuilds = 0;
        let index = sequencer
            .resolve_with_recovery(Direction::Next, |s| {
                rebuilds += 1;
                s.shuffle_order_mut().clear();
                s.shuffle_order_mut().push(TrackId::new("gone"));
            })
            .unwrap();

        assert_eq!(index, 0);
        assert_eq!(rebuilds, 1);
    }

    #[test]
    fn non_desync_errors_skip_recovery() {
        let mut sequencer = sequencer_with(Vec::new());

        let err = sequencer
            .resolve_with_recovery(Direction::Next, |_| panic!("no rebuild expected"))
            .unwrap_err();

        assert_eq!(err, SequencerError::EmptyPlaylist);
    }

    #[test]
    fn toggle_shuffle_keeps_selection() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(2).unwrap();

        assert!(sequencer.toggle_shuffle());
        assert_eq!(sequencer.shuffle_order().len(), 4);
        assert!(!sequencer.toggle_shuffle());
        assert!(sequencer.shuffle_order().is_empty());

        assert_eq!(sequencer.current_index(), Some(2));
        assert_eq!(sequencer.current_track().unwrap().id.as_str(), "c");
    }

    #[test]
    fn new_playlist_while_shuffling_gets_new_order() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.toggle_shuffle();

        sequencer.set_active_playlist(vec![create_test_track("x"), create_test_track("y")]);
        let mut order: Vec<&str> = sequencer.shuffle_order().iter().map(|id| id.as_str()).collect();
        order.sort_unstable();
        assert_eq!(order, vec!["x", "y"]);
    }

    #[test]
    fn restore_rejects_non_permutation() {
        let mut sequencer = sequencer_with(abcd());
        let err = sequencer
            .restore_shuffle_order(ids(&["a", "b", "c"]))
            .unwrap_err();
        assert!(matches!(err, SequencerError::InvalidShuffleOrder(_)));
        assert!(!sequencer.is_shuffling());
    }

    #[test]
    fn cycle_repeat_mode_three_times() {
        let mut sequencer = PlaybackSequencer::default();
        assert_eq!(sequencer.cycle_repeat_mode(), RepeatMode::All);
        assert_eq!(sequencer.cycle_repeat_mode(), RepeatMode::One);
        assert_eq!(sequencer.cycle_repeat_mode(), RepeatMode::Off);
    }

    #[test]
    fn track_end_repeat_one_replays() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.set_repeat_mode(RepeatMode::One);
        sequencer.select_index(3).unwrap();
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Replay(3));
    }

    #[test]
    fn track_end_advances_in_middle() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(1).unwrap();
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Advance(2));
        assert_eq!(sequencer.current_index(), Some(2));
    }

    #[test]
    fn track_end_at_last_stops_by_default() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(3).unwrap();
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Stop);
        assert_eq!(sequencer.current_index(), Some(3));
    }

    #[test]
    fn track_end_at_last_wraps_with_wrap_policy() {
        let mut sequencer = PlaybackSequencer::new(SequencerConfig {
            end_of_queue: EndOfQueue::Wrap,
            ..Default::default()
        });
        sequencer.set_active_playlist(abcd());
        sequencer.select_index(3).unwrap();
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Advance(0));
    }

    #[test]
    fn track_end_at_last_wraps_with_repeat_all() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.set_repeat_mode(RepeatMode::All);
        sequencer.select_index(3).unwrap();
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Advance(0));
    }

    #[test]
    fn track_end_while_shuffling_is_circular() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.restore_shuffle_order(ids(&["c", "a", "d", "b"])).unwrap();
        sequencer.select_index(1).unwrap(); // b, last in order
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Advance(2)); // c
    }

    #[test]
    fn track_end_without_selection_stops() {
        let mut sequencer = sequencer_with(abcd());
        assert_eq!(sequencer.on_track_ended(), TrackEnd::Stop);
    }

    #[test]
    fn preview_follows_playlist_order() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(1).unwrap();
        let preview: Vec<&str> = sequencer.queue_preview(10).map(|t| t.id.as_str()).collect();
        assert_eq!(preview, vec!["c", "d"]);

        sequencer.set_repeat_mode(RepeatMode::All);
        let preview: Vec<&str> = sequencer.queue_preview(10).map(|t| t.id.as_str()).collect();
        assert_eq!(preview, vec!["c", "d", "a"]);
    }

    #[test]
    fn preview_follows_shuffle_order() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.restore_shuffle_order(ids(&["c", "a", "d", "b"])).unwrap();
        sequencer.set_repeat_mode(RepeatMode::All);
        sequencer.select_index(0).unwrap(); // a

        let preview: Vec<&str> = sequencer.queue_preview(10).map(|t| t.id.as_str()).collect();
        assert_eq!(preview, vec!["d", "b", "c"]);
    }

    #[test]
    fn preview_with_zero_limit_is_empty() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.select_index(0).unwrap();
        assert_eq!(sequencer.queue_preview(0).count(), 0);
    }

    #[test]
    fn desynced_preview_hides_current_track() {
        let mut sequencer = sequencer_with(abcd());
        sequencer.toggle_shuffle();
        sequencer.select_index(0).unwrap();
        sequencer.shuffle_order_mut().retain(|id| id.as_str() != "a");
        sequencer.shuffle_order_mut().push(TrackId::new("a2"));

        assert!(sequencer
            .queue_preview(10)
            .all(|track| track.id.as_str() != "a"));
    }
}
