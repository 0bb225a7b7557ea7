// Controller module - the voice action controller state machine
//
// One `update` call per frame drives the whole pipeline:
//
//   raw amplitude -> Smoother -> SilenceMonitor -> ActivationGate
//                 -> HysteresisTracker -> ActionDispatcher -> PlayerActions
//
// 1. Cooldowns count down by dt.
// 2. Sustained silence forces Neutral, stands the entity up once, and ends
//    the tick.
// 3. Before activation the state is pinned to Neutral and nothing fires.
//    The tick that opens the gate is processed normally.
// 4. The hysteresis tracker updates the displayed state.
// 5. Continuous mode fires from that state; confirm mode fires only on a
//    confirm edge, from the instantaneous band.
//
// All state is owned by one controller instance and touched only from
// `update`. Durations are elapsed seconds, so a variable dt is fine.

pub mod actions;
pub mod cooldown;
pub mod dispatch;

use serde::Serialize;

use crate::analysis::{
    ActivationGate, GateStatus, HysteresisTracker, SilenceMonitor, SilenceStatus, VoiceState,
};
use crate::audio::source::{sanitize, AmplitudeSource, Smoother};
use crate::config::{ControllerConfig, DispatchMode};
use crate::error::{log_config_error, ConfigError};
use crate::telemetry::ControllerEvent;

pub use actions::{Action, ActionRecorder, PlayerActions};
pub use cooldown::Cooldown;
pub use dispatch::{ActionDispatcher, ConfirmIgnoredReason, ConfirmOutcome};

/// Headroom above loud_min used to scale the meter level
const METER_HEADROOM: f32 = 1.15;

/// Inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// RMS of the latest capture window
    pub raw_amplitude: f32,
    /// Elapsed seconds since the previous tick
    pub dt: f32,
    /// Rising edge of the external confirm trigger
    pub confirm: bool,
}

impl TickInput {
    pub fn new(raw_amplitude: f32, dt: f32) -> Self {
        Self {
            raw_amplitude,
            dt,
            confirm: false,
        }
    }

    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub state: VoiceState,
    pub previous_state: VoiceState,
    pub raw_amplitude: f32,
    pub smoothed_amplitude: f32,
    pub activated: bool,
    pub actions: Vec<Action>,
    pub events: Vec<ControllerEvent>,
}

impl TickReport {
    /// True if this tick fired an intentional gameplay action
    pub fn fired_trigger(&self) -> bool {
        self.actions.iter().any(|action| action.is_trigger())
    }
}

/// Read-only view polled by display collaborators
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ControllerSnapshot {
    pub state: VoiceState,
    pub raw_amplitude: f32,
    pub smoothed_amplitude: f32,
    pub activated: bool,
    pub crouched: bool,
    /// Smoothed amplitude scaled to [0, 1] with headroom above loud_min
    pub meter_level: f32,
    pub mode: DispatchMode,
}

pub struct VoiceActionController {
    config: ControllerConfig,
    smoother: Smoother,
    tracker: HysteresisTracker,
    silence: SilenceMonitor,
    gate: ActivationGate,
    dispatcher: ActionDispatcher,
    raw_amplitude: f32,
    ticks: u64,
}

impl VoiceActionController {
    /// Build a controller in its initial state (Neutral, zero amplitude,
    /// zero timers, not activated)
    ///
    /// # Returns
    /// * `Err(ConfigError)` - Band structure or numeric ranges are invalid
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log_config_error(&err, "VoiceActionController::new");
            return Err(err);
        }

        log::info!(
            "[Controller] Created in {:?} mode (quiet {}..{}, loud >= {}, margin {})",
            config.mode,
            config.thresholds.quiet_min,
            config.thresholds.quiet_max,
            config.thresholds.loud_min,
            config.hysteresis_margin
        );

        Ok(Self {
            smoother: Smoother::new(config.smoothing),
            tracker: HysteresisTracker::new(config.thresholds, config.hysteresis_margin),
            silence: SilenceMonitor::new(
                config.neutral_return_threshold,
                config.neutral_hold_time,
            ),
            gate: ActivationGate::new(config.activation_threshold),
            dispatcher: ActionDispatcher::new(&config),
            raw_amplitude: 0.0,
            ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> VoiceState {
        self.tracker.state()
    }

    pub fn is_activated(&self) -> bool {
        self.gate.is_activated()
    }

    pub fn smoothed_amplitude(&self) -> f32 {
        self.smoother.value()
    }

    pub fn raw_amplitude(&self) -> f32 {
        self.raw_amplitude
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let smoothed = self.smoother.value();
        let meter_max = self.config.thresholds.loud_min * METER_HEADROOM;
        let meter_level = if meter_max > 0.0 {
            (smoothed / meter_max).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ControllerSnapshot {
            state: self.tracker.state(),
            raw_amplitude: self.raw_amplitude,
            smoothed_amplitude: smoothed,
            activated: self.gate.is_activated(),
            crouched: self.dispatcher.is_crouched(),
            meter_level,
            mode: self.dispatcher.mode(),
        }
    }

    /// Advance the controller by one tick
    ///
    /// A negative or non-finite `dt` counts as zero elapsed time.
    pub fn update<E: PlayerActions + ?Sized>(
        &mut self,
        input: TickInput,
        entity: &mut E,
    ) -> TickReport {
        let dt = if input.dt.is_finite() {
            input.dt.max(0.0)
        } else {
            0.0
        };
        self.raw_amplitude = sanitize(input.raw_amplitude);
        let amplitude = self.smoother.update(self.raw_amplitude);
        let previous = self.tracker.state();
        let mut actions = Vec::new();
        let mut events = Vec::new();

        self.ticks += 1;
        self.dispatcher.advance_timers(dt);

        let silence = self.silence.observe(amplitude, dt);
        if silence.forces_neutral() {
            self.tracker.force_neutral();
            if silence == SilenceStatus::Returned {
                log::debug!(
                    "[Controller] Silent for {:.3}s, returning to Neutral",
                    self.silence.accumulated()
                );
                self.dispatcher.stand_down(entity, &mut actions);
                events.push(ControllerEvent::SilenceReturn {
                    silent_for: self.silence.accumulated(),
                });
            }
            if input.confirm {
                events.push(ControllerEvent::ConfirmIgnored {
                    reason: ConfirmIgnoredReason::SilenceReturn,
                });
            }
            return self.finish(previous, actions, events);
        }

        match self.gate.observe(amplitude) {
            GateStatus::Closed => {
                self.tracker.force_neutral();
                self.dispatcher.hold_neutral(entity, &mut actions);
                if input.confirm {
                    events.push(ControllerEvent::ConfirmIgnored {
                        reason: ConfirmIgnoredReason::NotActivated,
                    });
                }
                return self.finish(previous, actions, events);
            }
            GateStatus::Opened => {
                log::info!("[Controller] Activated at amplitude {:.4}", amplitude);
                events.push(ControllerEvent::Activated { amplitude });
            }
            GateStatus::Open => {}
        }

        let state = self.tracker.advance(amplitude);

        match self.dispatcher.mode() {
            DispatchMode::Continuous => {
                self.dispatcher
                    .dispatch_continuous(state, dt, entity, &mut actions);
                if input.confirm {
                    events.push(ControllerEvent::ConfirmIgnored {
                        reason: ConfirmIgnoredReason::ContinuousMode,
                    });
                }
            }
            DispatchMode::Confirm if input.confirm => {
                match self.dispatcher.confirm(amplitude, entity, &mut actions) {
                    ConfirmOutcome::Resolved { band } => {
                        events.push(ControllerEvent::ConfirmResolved { band });
                    }
                    ConfirmOutcome::Ignored(reason) => {
                        events.push(ControllerEvent::ConfirmIgnored { reason });
                    }
                }
            }
            DispatchMode::Confirm => {}
        }

        self.finish(previous, actions, events)
    }

    /// Sample `source`, update, then advance the source clock by `dt`
    pub fn tick_source<S, E>(
        &mut self,
        source: &mut S,
        dt: f32,
        confirm: bool,
        entity: &mut E,
    ) -> TickReport
    where
        S: AmplitudeSource + ?Sized,
        E: PlayerActions + ?Sized,
    {
        let raw = source.sample();
        let report = self.update(TickInput::new(raw, dt).with_confirm(confirm), entity);
        source.advance(dt);
        report
    }

    fn finish(
        &self,
        previous: VoiceState,
        actions: Vec<Action>,
        mut events: Vec<ControllerEvent>,
    ) -> TickReport {
        let state = self.tracker.state();
        if state != previous {
            log::debug!("[Controller] {} -> {}", previous, state);
            events.push(ControllerEvent::StateChanged {
                from: previous,
                to: state,
            });
        }
        for &action in &actions {
            tracing::debug!(action = action.name(), state = %state, "dispatched action");
            events.push(ControllerEvent::ActionDispatched { action });
        }

        TickReport {
            tick: self.ticks,
            state,
            previous_state: previous,
            raw_amplitude: self.raw_amplitude,
            smoothed_amplitude: self.smoother.value(),
            activated: self.gate.is_activated(),
            actions,
            events,
        }
    }
}

#[cfg(test)]
mod tests;
