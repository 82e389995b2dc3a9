//! Volume control with logarithmic scaling
//!
//! Levels are percentages (0-100) mapped to -60 dB..0 dB, so equal slider
//! steps sound like equal loudness steps.

use serde::{Deserialize, Serialize};

/// Highest volume level
pub const MAX_LEVEL: u8 = 100;

/// Default level for new sessions
pub const DEFAULT_LEVEL: u8 = 80;

/// Volume level with mute
///
/// Muting keeps the level so unmuting restores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Create a volume at `level`, clamped to 0-100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_LEVEL),
            muted: false,
        }
    }

    /// Set the level (0-100); larger values are clamped
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Toggle mute; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain for the media element, in `0.0..=1.0`
    ///
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316
    /// - 80%  → -12 dB → 0.251
    /// - 100% →   0 dB → 1.0
    pub fn gain(&self) -> f32 {
        if self.muted || self.level == 0 {
            return 0.0;
        }

        let db = (f32::from(self.level) - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}
