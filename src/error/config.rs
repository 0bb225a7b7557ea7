// Configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 3001-3004
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Band thresholds are not ordered quiet_min <= quiet_max < loud_min
    pub const BAND_ORDER: i32 = 3001;

    /// A threshold, margin or duration is negative
    pub const NEGATIVE_VALUE: i32 = 3002;

    /// A value is NaN or infinite
    pub const NON_FINITE: i32 = 3003;

    /// Smoothing factor lies outside [0, 1]
    pub const SMOOTHING_RANGE: i32 = 3004;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Config error in {}: code={}, component=ControllerConfig, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration rejected at controller construction
///
/// A controller never runs with an ill-defined band structure; every
/// variant here is returned from `ControllerConfig::validate`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bands overlap or are inverted
    BandOrder {
        quiet_min: f32,
        quiet_max: f32,
        loud_min: f32,
    },

    /// Named field holds a negative value
    NegativeValue { field: &'static str, value: f32 },

    /// Named field is NaN or infinite
    NonFinite { field: &'static str },

    /// Smoothing factor outside [0, 1]
    SmoothingOutOfRange { value: f32 },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::BandOrder { .. } => ConfigErrorCodes::BAND_ORDER,
            ConfigError::NegativeValue { .. } => ConfigErrorCodes::NEGATIVE_VALUE,
            ConfigError::NonFinite { .. } => ConfigErrorCodes::NON_FINITE,
            ConfigError::SmoothingOutOfRange { .. } => ConfigErrorCodes::SMOOTHING_RANGE,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::BandOrder {
                quiet_min,
                quiet_max,
                loud_min,
            } => format!(
                "Band thresholds must satisfy quiet_min <= quiet_max < loud_min (got {} / {} / {})",
                quiet_min, quiet_max, loud_min
            ),
            ConfigError::NegativeValue { field, value } => {
                format!("{} must not be negative (got {})", field, value)
            }
            ConfigError::NonFinite { field } => format!("{} must be a finite number", field),
            ConfigError::SmoothingOutOfRange { value } => {
                format!("smoothing must lie in [0, 1] (got {})", value)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
