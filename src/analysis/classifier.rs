// Classifier - stateless amplitude band classification
//
// Maps a single amplitude reading onto one of four voice states using fixed
// band thresholds. There is no memory between calls: the same amplitude
// always yields the same state. The hysteresis tracker falls back to this
// function when entering from Neutral, and confirm-mode dispatch uses it to
// read the band at the instant of a confirm edge.
//
// Bands:
//   amplitude <  quiet_min              -> Neutral
//   quiet_min <= amplitude <= quiet_max -> Quiet
//   amplitude >= loud_min               -> Loud
//   otherwise                           -> Medium

use serde::{Deserialize, Serialize};
use std::fmt;

/// VoiceState represents the classified loudness of the voice signal
///
/// Quiet < Medium < Loud on the loudness scale. Neutral is the inactive
/// state and has no place on that scale, so the enum deliberately does not
/// implement `PartialOrd`; use [`VoiceState::band_rank`] to compare bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceState {
    /// Silence or not yet activated
    #[default]
    Neutral,
    /// Soft voice (crouch)
    Quiet,
    /// Normal voice (jump)
    Medium,
    /// Shouting (shoot)
    Loud,
}

impl VoiceState {
    /// True for every state except Neutral
    pub fn is_active(self) -> bool {
        !matches!(self, VoiceState::Neutral)
    }

    /// Position on the loudness scale (Quiet = 0, Medium = 1, Loud = 2)
    pub fn band_rank(self) -> Option<u8> {
        match self {
            VoiceState::Neutral => None,
            VoiceState::Quiet => Some(0),
            VoiceState::Medium => Some(1),
            VoiceState::Loud => Some(2),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoiceState::Neutral => "neutral",
            VoiceState::Quiet => "quiet",
            VoiceState::Medium => "medium",
            VoiceState::Loud => "loud",
        }
    }
}

impl fmt::Display for VoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band boundaries on the smoothed amplitude scale
///
/// Must satisfy `quiet_min <= quiet_max < loud_min`; values between
/// `quiet_max` and `loud_min` form the Medium band. Checked by
/// `ControllerConfig::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    /// Below this the signal counts as silence
    pub quiet_min: f32,
    /// Upper bound (inclusive) of the Quiet band
    pub quiet_max: f32,
    /// Lower bound (inclusive) of the Loud band
    pub loud_min: f32,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            quiet_min: 0.02,
            quiet_max: 0.18,
            loud_min: 0.375,
        }
    }
}

impl BandThresholds {
    /// Classify an amplitude into its band
    ///
    /// NaN falls into Neutral, so a corrupt reading can never fire an action.
    pub fn classify(&self, amplitude: f32) -> VoiceState {
        // Negated comparison so NaN lands in Neutral
        if !(amplitude >= self.quiet_min) {
            VoiceState::Neutral
        } else if amplitude <= self.quiet_max {
            VoiceState::Quiet
        } else if amplitude >= self.loud_min {
            VoiceState::Loud
        } else {
            VoiceState::Medium
        }
    }
}

/// Free-function form of [`BandThresholds::classify`]
pub fn classify(amplitude: f32, thresholds: &BandThresholds) -> VoiceState {
    thresholds.classify(amplitude)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
