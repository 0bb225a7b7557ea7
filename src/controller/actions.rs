// Controlled-entity surface
//
// The controller never touches physics or transforms. Everything it does to
// the player goes through `PlayerActions`, and every call is mirrored as an
// `Action` value in the tick report.

use serde::{Deserialize, Serialize};

/// Mutation surface of the controlled entity
pub trait PlayerActions {
    fn set_crouch(&mut self, crouch: bool);
    fn toggle_crouch(&mut self);
    fn stand_up(&mut self);
    fn jump(&mut self);
    fn shoot(&mut self);
}

/// One call made on [`PlayerActions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SetCrouch(bool),
    ToggleCrouch,
    StandUp,
    Jump,
    Shoot,
}

impl Action {
    /// True for intentional gameplay inputs; false for resets back to standing
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            Action::SetCrouch(true) | Action::ToggleCrouch | Action::Jump | Action::Shoot
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::SetCrouch(true) => "crouch",
            Action::SetCrouch(false) => "uncrouch",
            Action::ToggleCrouch => "toggle_crouch",
            Action::StandUp => "stand_up",
            Action::Jump => "jump",
            Action::Shoot => "shoot",
        }
    }
}

/// In-memory entity that records every effective call
///
/// `set_crouch` with the current value is a no-op and is not recorded.
#[derive(Debug, Default, Clone)]
pub struct ActionRecorder {
    crouched: bool,
    calls: Vec<Action>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    pub fn calls(&self) -> &[Action] {
        &self.calls
    }

    pub fn count(&self, action: Action) -> usize {
        self.calls.iter().filter(|&&call| call == action).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PlayerActions for ActionRecorder {
    fn set_crouch(&mut self, crouch: bool) {
        if self.crouched == crouch {
            return;
        }
        self.crouched = crouch;
        self.calls.push(Action::SetCrouch(crouch));
    }

    fn toggle_crouch(&mut self) {
        self.crouched = !self.crouched;
        self.calls.push(Action::ToggleCrouch);
    }

    fn stand_up(&mut self) {
        self.crouched = false;
        self.calls.push(Action::StandUp);
    }

    fn jump(&mut self) {
        self.calls.push(Action::Jump);
    }

    fn shoot(&mut self) {
        self.calls.push(Action::Shoot);
    }
}
