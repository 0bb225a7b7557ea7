//! Event types describing what the controller did on a tick, for UI
//! observers and CLI reports.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::VoiceState;
use crate::controller::actions::Action;
use crate::controller::dispatch::ConfirmIgnoredReason;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ControllerEvent {
    /// Activation gate opened
    Activated { amplitude: f32 },
    StateChanged { from: VoiceState, to: VoiceState },
    ActionDispatched { action: Action },
    /// Sustained silence forced Neutral and stood the entity up
    SilenceReturn { silent_for: f32 },
    /// Confirm edge accepted; `band` is the instantaneous classification
    ConfirmResolved { band: VoiceState },
    ConfirmIgnored { reason: ConfirmIgnoredReason },
}
