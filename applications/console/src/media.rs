//! Media playback collaborator
//!
//! Requests are fire-and-forget; completion comes back later as
//! `TimeUpdate`, `MetadataLoaded` and `TrackEnded` events.

use tracing::info;

/// Platform media element
pub trait MediaOutput {
    fn load(&mut self, src: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);

    /// Output gain in `0.0..=1.0`
    fn set_volume(&mut self, gain: f32);
}

/// Media output that only logs requests
///
/// Used by the console binary, which has no audio device of its own.
#[derive(Debug)]
pub struct LogMedia {
    loaded: Option<String>,
    playing: bool,
    gain: f32,
}

impl Default for LogMedia {
    fn default() -> Self {
        Self {
            loaded: None,
            playing: false,
            gain: 1.0,
        }
    }
}

impl LogMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl MediaOutput for LogMedia {
    fn load(&mut self, src: &str) {
        info!(src, "Loading media");
        self.loaded = Some(src.to_string());
        self.playing = false;
    }

    fn play(&mut self) {
        info!(src = ?self.loaded, "Play");
        self.playing = true;
    }

    fn pause(&mut self) {
        info!("Pause");
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        info!(seconds, "Seek");
    }

    fn set_volume(&mut self, gain: f32) {
        info!(gain, "Volume");
        self.gain = gain;
    }
}
