// ActionDispatcher - debounced action firing
//
// Owns the per-action cooldowns and the crouch latch. Two dispatch modes:
//
// Continuous: every tick, Medium fires jump and Loud fires shoot whenever
//   their cooldown has expired; Quiet held for `quiet_hold_time` asserts
//   crouch as a level (not cooldown gated).
//
// Confirm: nothing fires on ticks. An external confirm edge, gated by its
//   own cooldown, classifies the amplitude at that instant with the pure
//   band classifier (not the hysteresis state): Quiet toggles crouch,
//   Medium jumps, Loud shoots, Neutral fires nothing. Every band other than
//   Quiet releases the crouch latch first so a crouch is never left behind.

use serde::{Deserialize, Serialize};

use super::actions::{Action, PlayerActions};
use super::cooldown::Cooldown;
use crate::analysis::classifier::{BandThresholds, VoiceState};
use crate::config::{ControllerConfig, DispatchMode};

/// Why a confirm edge produced no dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmIgnoredReason {
    /// Activation gate still closed
    NotActivated,
    /// Confirm cooldown has not expired
    CoolingDown,
    /// Controller runs in continuous mode
    ContinuousMode,
    /// Tick was consumed by the silence return
    SilenceReturn,
}

/// Result of [`ActionDispatcher::confirm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Ignored(ConfirmIgnoredReason),
    /// Accepted; `band` is the instantaneous classification
    Resolved { band: VoiceState },
}

pub struct ActionDispatcher {
    mode: DispatchMode,
    thresholds: BandThresholds,
    quiet_hold_time: f32,
    jump: Cooldown,
    shoot: Cooldown,
    confirm: Cooldown,
    /// Continuous time spent in Quiet
    quiet_held: f32,
    /// Last crouch value forwarded to the entity
    crouched: bool,
}

impl ActionDispatcher {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            mode: config.mode,
            thresholds: config.thresholds,
            quiet_hold_time: config.quiet_hold_time,
            jump: Cooldown::new(config.jump_cooldown),
            shoot: Cooldown::new(config.shoot_cooldown),
            confirm: Cooldown::new(config.confirm_cooldown),
            quiet_held: 0.0,
            crouched: false,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    /// Count every cooldown down by the tick's elapsed time
    pub fn advance_timers(&mut self, dt: f32) {
        self.jump.tick(dt);
        self.shoot.tick(dt);
        self.confirm.tick(dt);
    }

    /// Forward a crouch value only when the latch changes
    pub fn set_crouch<E: PlayerActions + ?Sized>(
        &mut self,
        crouch: bool,
        entity: &mut E,
        out: &mut Vec<Action>,
    ) {
        if self.crouched == crouch {
            return;
        }
        self.crouched = crouch;
        entity.set_crouch(crouch);
        out.push(Action::SetCrouch(crouch));
    }

    /// Silence-return reset: stand the entity up and clear the quiet hold
    pub fn stand_down<E: PlayerActions + ?Sized>(
        &mut self,
        entity: &mut E,
        out: &mut Vec<Action>,
    ) {
        self.quiet_held = 0.0;
        self.crouched = false;
        entity.stand_up();
        out.push(Action::StandUp);
    }

    /// Keep the entity standing while the controller reports Neutral before activation
    pub fn hold_neutral<E: PlayerActions + ?Sized>(
        &mut self,
        entity: &mut E,
        out: &mut Vec<Action>,
    ) {
        self.quiet_held = 0.0;
        self.set_crouch(false, entity, out);
    }

    /// Level-driven dispatch for one tick of continuous mode
    pub fn dispatch_continuous<E: PlayerActions + ?Sized>(
        &mut self,
        state: VoiceState,
        dt: f32,
        entity: &mut E,
        out: &mut Vec<Action>,
    ) {
        if state == VoiceState::Quiet {
            self.quiet_held += dt;
        } else {
            self.quiet_held = 0.0;
        }
        let crouch = state == VoiceState::Quiet && self.quiet_held >= self.quiet_hold_time;
        self.set_crouch(crouch, entity, out);

        match state {
            VoiceState::Medium if self.jump.try_fire() => {
                entity.jump();
                out.push(Action::Jump);
            }
            VoiceState::Loud if self.shoot.try_fire() => {
                entity.shoot();
                out.push(Action::Shoot);
            }
            _ => {}
        }
    }

    /// Resolve an accepted confirm edge against the instantaneous band
    pub fn confirm<E: PlayerActions + ?Sized>(
        &mut self,
        amplitude: f32,
        entity: &mut E,
        out: &mut Vec<Action>,
    ) -> ConfirmOutcome {
        if !self.confirm.try_fire() {
            return ConfirmOutcome::Ignored(ConfirmIgnoredReason::CoolingDown);
        }

        let band = self.thresholds.classify(amplitude);
        match band {
            VoiceState::Quiet => {
                self.crouched = !self.crouched;
                entity.toggle_crouch();
                out.push(Action::ToggleCrouch);
            }
            VoiceState::Medium => {
                self.set_crouch(false, entity, out);
                if self.jump.try_fire() {
                    entity.jump();
                    out.push(Action::Jump);
                }
            }
            VoiceState::Loud => {
                self.set_crouch(false, entity, out);
                if self.shoot.try_fire() {
                    entity.shoot();
                    out.push(Action::Shoot);
                }
            }
            VoiceState::Neutral => self.set_crouch(false, entity, out),
        }

        ConfirmOutcome::Resolved { band }
    }
}
