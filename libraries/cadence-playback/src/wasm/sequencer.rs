//! WASM-compatible PlaybackSequencer wrapper

use crate::{
    search, Direction, EndOfQueue, PlaybackSequencer, RepeatMode, SequencerConfig,
    SequencerError, TrackEnd,
};
use cadence_core::Track;
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible playback sequencer
///
/// Tracks cross the boundary as plain JS objects
/// (`{src, artist, title, img, id}`).
#[wasm_bindgen]
pub struct WasmSequencer {
    inner: PlaybackSequencer,

    // Event callbacks
    on_track_change: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmSequencer {
    /// Create a new sequencer
    ///
    /// `wrap_at_end` selects the legacy behaviour of wrapping to the first
    /// track when the last one ends with repeat off.
    #[wasm_bindgen(constructor)]
    pub fn new(wrap_at_end: bool) -> Self {
        console_error_panic_hook::set_once();

        let config = SequencerConfig {
            end_of_queue: if wrap_at_end {
                EndOfQueue::Wrap
            } else {
                EndOfQueue::Stop
            },
            ..Default::default()
        };

        Self {
            inner: PlaybackSequencer::new(config),
            on_track_change: None,
            on_error: None,
        }
    }

    // ===== Active Playlist =====

    /// Replace the active playlist with an array of track objects
    #[wasm_bindgen(js_name = setActivePlaylist)]
    pub fn set_active_playlist(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)?;
        self.inner.set_active_playlist(tracks);
        Ok(())
    }

    /// Filter `library` by `query` and make the result the active playlist
    pub fn search(&mut self, library: JsValue, query: &str) -> Result<JsValue, JsValue> {
        let library: Vec<Track> = serde_wasm_bindgen::from_value(library)?;
        let results = search::filter(&library, query);
        let value = serde_wasm_bindgen::to_value(&results)?;
        self.inner.set_active_playlist(results);
        Ok(value)
    }

    // ===== Navigation =====

    #[wasm_bindgen(js_name = selectIndex)]
    pub fn select_index(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let track = self
            .inner
            .select_index(index)
            .cloned()
            .map_err(|e| self.handle_error(e))?;
        self.emit_track_change(&track);
        Ok(serde_wasm_bindgen::to_value(&track)?)
    }

    /// Move to the next track; returns the new current track
    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        self.step(Direction::Next)
    }

    /// Move to the previous track; returns the new current track
    pub fn previous(&mut self) -> Result<JsValue, JsValue> {
        self.step(Direction::Previous)
    }

    /// Handle the media element's `ended` event
    ///
    /// Returns `"replay"`, `"advance"` or `"stop"`.
    #[wasm_bindgen(js_name = trackEnded)]
    pub fn track_ended(&mut self) -> String {
        match self.inner.on_track_ended() {
            TrackEnd::Replay(_) => "replay".to_string(),
            TrackEnd::Advance(_) => {
                if let Some(track) = self.inner.current_track().cloned() {
                    self.emit_track_change(&track);
                }
                "advance".to_string()
            }
            TrackEnd::Stop => "stop".to_string(),
        }
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.inner.current_index()
    }

    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.current_track())?)
    }

    // ===== Shuffle & Repeat =====

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) -> bool {
        self.inner.toggle_shuffle()
    }

    /// Cycle repeat mode; returns `"off"`, `"all"` or `"one"`
    #[wasm_bindgen(js_name = cycleRepeatMode)]
    pub fn cycle_repeat_mode(&mut self) -> String {
        match self.inner.cycle_repeat_mode() {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
        .to_string()
    }

    // ===== Queue =====

    /// Up to `limit` upcoming tracks as an array of track objects
    #[wasm_bindgen(js_name = queuePreview)]
    pub fn queue_preview(&self, limit: usize) -> Result<JsValue, JsValue> {
        let upcoming: Vec<&Track> = self.inner.queue_preview(limit).collect();
        Ok(serde_wasm_bindgen::to_value(&upcoming)?)
    }

    // ===== Event Callbacks =====

    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&mut self, callback: Function) {
        self.on_track_change = Some(callback);
    }

    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }
}

// Internal helpers, not exported to JS
impl WasmSequencer {
    fn step(&mut self, direction: Direction) -> Result<JsValue, JsValue> {
        let track = self
            .inner
            .step(direction)
            .cloned()
            .map_err(|e| self.handle_error(e))?;
        self.emit_track_change(&track);
        Ok(serde_wasm_bindgen::to_value(&track)?)
    }

    fn emit_track_change(&self, track: &Track) {
        if let Some(ref callback) = self.on_track_change {
            if let Ok(value) = serde_wasm_bindgen::to_value(track) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        }
    }

    fn handle_error(&self, error: SequencerError) -> JsValue {
        let message = error.to_string();
        if let Some(ref callback) = self.on_error {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&message));
        }
        JsValue::from_str(&message)
    }
}
