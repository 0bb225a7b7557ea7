// Activation gate - cold-start guard
//
// Startup noise (engine init, microphone warm-up) must not trigger actions.
// The gate stays closed until the amplitude exceeds the activation threshold
// once; after that it never closes again for the controller's lifetime.

/// Result of feeding one amplitude reading to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Not yet activated; report Neutral and fire nothing
    Closed,
    /// Activated by this reading
    Opened,
    /// Activated on an earlier tick
    Open,
}

impl GateStatus {
    pub fn is_open(self) -> bool {
        !matches!(self, GateStatus::Closed)
    }
}

/// One-shot activation latch
#[derive(Debug, Clone)]
pub struct ActivationGate {
    threshold: f32,
    activated: bool,
}

impl ActivationGate {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            activated: false,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Latch open the first time `amplitude` strictly exceeds the threshold
    pub fn observe(&mut self, amplitude: f32) -> GateStatus {
        if self.activated {
            GateStatus::Open
        } else if amplitude > self.threshold {
            self.activated = true;
            GateStatus::Opened
        } else {
            GateStatus::Closed
        }
    }
}
