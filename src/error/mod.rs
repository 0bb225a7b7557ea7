// Error types for the voice action controller
//
// This module defines custom error types for configuration and audio-source
// operations, providing structured error handling with numeric error codes.

mod audio;
mod config;

pub use audio::{log_audio_error, AudioError, AudioErrorCodes};
pub use config::{log_config_error, ConfigError, ConfigErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so callers embedding the controller can map
/// failures without matching on every variant.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
