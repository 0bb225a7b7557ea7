//! Configuration for the voice action controller
//!
//! Calibration values are passed to the controller as a plain record at
//! construction time. This module also loads that record from JSON files so
//! thresholds can be tuned between runs without recompiling. Loading never
//! fails; validation happens when a controller is built from the values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::classifier::BandThresholds;
use crate::error::ConfigError;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub controller: ControllerConfig,
    pub audio: AudioConfig,
}

/// How classified states turn into gameplay actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Every tick: Medium jumps, Loud shoots, sustained Quiet crouches
    #[default]
    Continuous,
    /// Actions fire only on an external confirm edge, using the band at that moment
    Confirm,
}

/// Tunable parameters of the classifier and dispatcher
///
/// All durations are seconds of elapsed time, never tick counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub thresholds: BandThresholds,
    /// Dead zone around quiet_max and loud_min
    pub hysteresis_margin: f32,
    /// First sample above this unlocks the controller for its lifetime
    pub activation_threshold: f32,
    /// Amplitude below this counts toward the silence return
    pub neutral_return_threshold: f32,
    pub neutral_hold_time: f32,
    /// Continuous mode: Quiet must persist this long before crouching
    pub quiet_hold_time: f32,
    pub jump_cooldown: f32,
    pub shoot_cooldown: f32,
    pub confirm_cooldown: f32,
    /// EMA factor: 1 keeps the old value forever, 0 snaps to the raw sample
    pub smoothing: f32,
    pub mode: DispatchMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            thresholds: BandThresholds::default(),
            hysteresis_margin: 0.02,
            activation_threshold: 0.05,
            neutral_return_threshold: 0.01,
            neutral_hold_time: 0.5,
            quiet_hold_time: 0.2,
            jump_cooldown: 0.25,
            shoot_cooldown: 0.15,
            confirm_cooldown: 0.3,
            smoothing: 0.2,
            mode: DispatchMode::Continuous,
        }
    }
}

impl ControllerConfig {
    /// Same defaults, confirm-driven dispatch
    pub fn confirm_mode() -> Self {
        Self {
            mode: DispatchMode::Confirm,
            ..Self::default()
        }
    }

    /// Check the band structure and numeric ranges
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ConfigError)` - First problem found
    ///
    /// Margins wider than a band gap and a silence-return threshold above
    /// `quiet_min` are legal but logged, since they make parts of the state
    /// machine unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let fields = [
            ("quiet_min", t.quiet_min),
            ("quiet_max", t.quiet_max),
            ("loud_min", t.loud_min),
            ("hysteresis_margin", self.hysteresis_margin),
            ("activation_threshold", self.activation_threshold),
            ("neutral_return_threshold", self.neutral_return_threshold),
            ("neutral_hold_time", self.neutral_hold_time),
            ("quiet_hold_time", self.quiet_hold_time),
            ("jump_cooldown", self.jump_cooldown),
            ("shoot_cooldown", self.shoot_cooldown),
            ("confirm_cooldown", self.confirm_cooldown),
            ("smoothing", self.smoothing),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }

        if t.quiet_min > t.quiet_max || t.quiet_max >= t.loud_min {
            return Err(ConfigError::BandOrder {
                quiet_min: t.quiet_min,
                quiet_max: t.quiet_max,
                loud_min: t.loud_min,
            });
        }

        if self.smoothing > 1.0 {
            return Err(ConfigError::SmoothingOutOfRange {
                value: self.smoothing,
            });
        }

        let medium_gap = t.loud_min - t.quiet_max;
        if self.hysteresis_margin * 2.0 >= medium_gap {
            log::warn!(
                "[Config] hysteresis_margin {} leaves no stable Medium band (gap {})",
                self.hysteresis_margin,
                medium_gap
            );
        }
        if self.neutral_return_threshold > t.quiet_min {
            log::warn!(
                "[Config] neutral_return_threshold {} is above quiet_min {}",
                self.neutral_return_threshold,
                t.quiet_min
            );
        }

        Ok(())
    }
}

/// Capture parameters for amplitude sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Preferred capture rate in Hz
    pub sample_rate: u32,
    /// Samples per RMS window
    pub sample_window: usize,
    /// Capacity of the lock-free ring between capture callback and tick loop
    pub ring_capacity: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            sample_window: 1024,
            ring_capacity: 16_384,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration; defaults if the file is missing or invalid.
    /// Fields absent from the file keep their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}
