// Hysteresis - sticky voice state tracking
//
// A signal hovering near a band boundary would flip between adjacent states
// every tick if classified directly. The tracker only leaves a band once the
// amplitude clears the boundary by `margin`:
//
//   Neutral -> classify(amplitude)            (no hysteresis on entry)
//   Quiet   -> Medium  when a > quiet_max + margin
//   Medium  -> Quiet   when a < quiet_max - margin
//   Medium  -> Loud    when a > loud_min + margin
//   Loud    -> Medium  when a < loud_min - margin
//
// Silence overrides everything: a < quiet_min always yields Neutral.
//
// The separate silence return (SilenceMonitor) is time based: the amplitude
// must stay under a stricter threshold for a whole hold duration, so one
// dropout does not reset the controller.

use super::classifier::{BandThresholds, VoiceState};

/// Slack for f32 rounding when summing non-dyadic frame times (1/60 s)
const HOLD_EPSILON: f32 = 1e-4;

/// Pure transition function `(state, amplitude) -> state`
///
/// # Arguments
/// * `state` - Current tracked state
/// * `amplitude` - Smoothed amplitude for this tick
/// * `thresholds` - Band boundaries
/// * `margin` - Dead-zone half width around quiet_max and loud_min
pub fn next_state(
    state: VoiceState,
    amplitude: f32,
    thresholds: &BandThresholds,
    margin: f32,
) -> VoiceState {
    if !(amplitude >= thresholds.quiet_min) {
        return VoiceState::Neutral;
    }

    match state {
        VoiceState::Neutral => thresholds.classify(amplitude),
        VoiceState::Quiet => {
            if amplitude > thresholds.quiet_max + margin {
                VoiceState::Medium
            } else {
                VoiceState::Quiet
            }
        }
        VoiceState::Medium => {
            if amplitude < thresholds.quiet_max - margin {
                VoiceState::Quiet
            } else if amplitude > thresholds.loud_min + margin {
                VoiceState::Loud
            } else {
                VoiceState::Medium
            }
        }
        VoiceState::Loud => {
            if amplitude < thresholds.loud_min - margin {
                VoiceState::Medium
            } else {
                VoiceState::Loud
            }
        }
    }
}

/// Owns the current state and applies [`next_state`] once per tick
#[derive(Debug, Clone)]
pub struct HysteresisTracker {
    thresholds: BandThresholds,
    margin: f32,
    state: VoiceState,
}

impl HysteresisTracker {
    pub fn new(thresholds: BandThresholds, margin: f32) -> Self {
        Self {
            thresholds,
            margin,
            state: VoiceState::Neutral,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// Fold one amplitude reading into the tracked state
    pub fn advance(&mut self, amplitude: f32) -> VoiceState {
        self.state = next_state(self.state, amplitude, &self.thresholds, self.margin);
        self.state
    }

    pub fn force_neutral(&mut self) {
        self.state = VoiceState::Neutral;
    }
}

/// Outcome of one [`SilenceMonitor::observe`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilenceStatus {
    /// Amplitude at or above the return threshold; accumulator cleared
    Sounding,
    /// Below threshold but the hold time has not elapsed yet
    Accumulating,
    /// Hold time reached on this tick; fires once per silent stretch
    Returned,
    /// Still silent after a return already fired
    Holding,
}

impl SilenceStatus {
    /// Whether the rest of the tick should be skipped
    pub fn forces_neutral(self) -> bool {
        matches!(self, SilenceStatus::Returned | SilenceStatus::Holding)
    }
}

/// Accumulates continuous silence and reports when it reaches the hold time
#[derive(Debug, Clone)]
pub struct SilenceMonitor {
    threshold: f32,
    hold_time: f32,
    accumulated: f32,
    returned: bool,
}

impl SilenceMonitor {
    pub fn new(threshold: f32, hold_time: f32) -> Self {
        Self {
            threshold,
            hold_time,
            accumulated: 0.0,
            returned: false,
        }
    }

    /// Elapsed time the amplitude has continuously stayed below the threshold
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn observe(&mut self, amplitude: f32, dt: f32) -> SilenceStatus {
        if amplitude >= self.threshold {
            self.accumulated = 0.0;
            self.returned = false;
            return SilenceStatus::Sounding;
        }

        self.accumulated += dt;
        if self.accumulated + HOLD_EPSILON < self.hold_time {
            SilenceStatus::Accumulating
        } else if self.returned {
            SilenceStatus::Holding
        } else {
            self.returned = true;
            SilenceStatus::Returned
        }
    }
}
