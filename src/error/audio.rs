// Audio source error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Audio error code constants
///
/// Error code range: 1001-1004
pub struct AudioErrorCodes {}

impl AudioErrorCodes {
    /// No capture device is present
    pub const DEVICE_UNAVAILABLE: i32 = 1001;

    /// Failed to open the input stream
    pub const STREAM_OPEN_FAILED: i32 = 1002;

    /// Stream disconnected or failed while running
    pub const STREAM_FAILURE: i32 = 1003;

    /// Recorded audio file could not be decoded
    pub const WAV_READ_FAILED: i32 = 1004;
}

/// Log an audio error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "Audio error in {}: code={}, component=AmplitudeSource, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while opening or reading an amplitude source
///
/// None of these are fatal to the controller: callers fall back to a
/// silent source and keep ticking.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// No capture device is present on this host
    DeviceUnavailable,

    /// The device exists but the input stream could not be built or started
    StreamOpenFailed { reason: String },

    /// The stream reported an error after it started
    StreamFailure { reason: String },

    /// A WAV file could not be opened or decoded
    WavRead { reason: String },
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::DeviceUnavailable => AudioErrorCodes::DEVICE_UNAVAILABLE,
            AudioError::StreamOpenFailed { .. } => AudioErrorCodes::STREAM_OPEN_FAILED,
            AudioError::StreamFailure { .. } => AudioErrorCodes::STREAM_FAILURE,
            AudioError::WavRead { .. } => AudioErrorCodes::WAV_READ_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::DeviceUnavailable => "No capture device available".to_string(),
            AudioError::StreamOpenFailed { reason } => {
                format!("Failed to open input stream: {}", reason)
            }
            AudioError::StreamFailure { reason } => format!("Input stream failure: {}", reason),
            AudioError::WavRead { reason } => format!("Failed to read WAV file: {}", reason),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AudioError {}
