// Audio module - amplitude sources feeding the controller

pub mod capture;
#[cfg(feature = "mic")]
pub mod microphone;
pub mod source;
pub mod synthetic;
pub mod wav;

// Re-export commonly used types for convenience
pub use capture::{capture_channel, push_first_channel, CaptureWindow};
#[cfg(feature = "mic")]
pub use microphone::MicrophoneSource;
pub use source::{rms, sanitize, AmplitudeSource, ScriptedSource, SilentSource, Smoother};
pub use synthetic::{SyntheticPattern, SyntheticSource};
pub use wav::WavSource;
