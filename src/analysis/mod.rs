// Analysis module - amplitude to voice state classification
//
// Three pieces, leaves first:
// 1. classifier: pure band classification (no memory)
// 2. hysteresis: sticky state tracking plus the timed silence return
// 3. activation: one-shot gate that keeps everything Neutral until the
//    user has spoken once
//
// The controller module wires these together with the action dispatcher.

pub mod activation;
pub mod classifier;
pub mod hysteresis;

pub use activation::{ActivationGate, GateStatus};
pub use classifier::{classify, BandThresholds, VoiceState};
pub use hysteresis::{next_state, HysteresisTracker, SilenceMonitor, SilenceStatus};
