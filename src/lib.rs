// Voice Actions Core - amplitude driven player controls
// Classifies microphone loudness into voice states and turns them into
// crouch, jump and shoot actions for a game entity

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod telemetry;

// Re-exports for convenience
pub use analysis::{classify, BandThresholds, VoiceState};
pub use audio::AmplitudeSource;
pub use config::{AppConfig, AudioConfig, ControllerConfig, DispatchMode};
pub use controller::{
    Action, ActionRecorder, ControllerSnapshot, PlayerActions, TickInput, TickReport,
    VoiceActionController,
};
pub use error::{AudioError, ConfigError, ErrorCode};
pub use telemetry::{ControllerEvent, EventHistory};

/// Install a stderr fmt subscriber at `level`
///
/// `log` records from the library are bridged into the same output. Calling
/// this twice is harmless; the second call keeps the first subscriber.
pub fn init_logging(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
