/// Countdown timer gating one action
///
/// Counts elapsed time down to zero and stops there, so one abnormally long
/// tick can make the action ready but never "owes" extra firings.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    duration: f32,
    remaining: f32,
}

impl Cooldown {
    /// Starts ready to fire
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the countdown after firing
    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    /// Fire if ready; returns whether it fired
    pub fn try_fire(&mut self) -> bool {
        if self.is_ready() {
            self.trigger();
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
