//! Volume control with mute memory
//!
//! Volume is a linear fraction in 0.0-1.0. Muting remembers the level it
//! replaced so the next toggle can restore it.

use serde::{Deserialize, Serialize};

/// Volume restored by unmute when no earlier level is remembered
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Level saved by the last mute
    muted_previous: Option<f32>,
}

/// Coarse loudness bucket for volume icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    /// Silent
    Muted,
    /// Below half volume
    Low,
    /// Half volume or louder
    High,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 0.0-1.0
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() { DEFAULT_VOLUME } else { level };
        Self {
            level: level.clamp(0.0, 1.0),
            muted_previous: None,
        }
    }

    /// Set volume level, clamped to 0.0-1.0
    ///
    /// Returns false and leaves the level unchanged for NaN.
    pub fn set_level(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Level remembered by the last mute
    pub fn muted_previous(&self) -> Option<f32> {
        self.muted_previous
    }

    /// Check if silent
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Toggle mute state
    ///
    /// An audible level is remembered and replaced by silence; silence is
    /// replaced by the remembered level, or [`DEFAULT_VOLUME`].
    pub fn toggle_mute(&mut self) -> f32 {
        if self.level > 0.0 {
            self.muted_previous = Some(self.level);
            self.level = 0.0;
        } else {
            self.level = self
                .muted_previous
                .filter(|previous| *previous > 0.0)
                .unwrap_or(DEFAULT_VOLUME);
        }
        self.level
    }

    /// Icon bucket for the current level
    pub fn icon_level(&self) -> VolumeLevel {
        if self.level == 0.0 {
            VolumeLevel::Muted
        } else if self.level < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
