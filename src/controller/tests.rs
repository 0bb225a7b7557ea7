use super::*;

/// Default thresholds with smoothing disabled so each input is the amplitude
fn instant_config() -> ControllerConfig {
    ControllerConfig {
        smoothing: 0.0,
        ..ControllerConfig::default()
    }
}

fn instant_confirm_config() -> ControllerConfig {
    ControllerConfig {
        smoothing: 0.0,
        mode: DispatchMode::Confirm,
        ..ControllerConfig::default()
    }
}

fn run(
    controller: &mut VoiceActionController,
    entity: &mut ActionRecorder,
    amplitudes: &[f32],
    dt: f32,
) -> Vec<VoiceState> {
    amplitudes
        .iter()
        .map(|&a| controller.update(TickInput::new(a, dt), entity).state)
        .collect()
}

#[test]
fn test_starts_neutral_and_inactive() {
    let controller = VoiceActionController::new(ControllerConfig::default()).unwrap();
    assert_eq!(controller.state(), VoiceState::Neutral);
    assert!(!controller.is_activated());
    assert_eq!(controller.smoothed_amplitude(), 0.0);
    assert_eq!(controller.raw_amplitude(), 0.0);
}

#[test]
fn test_rejects_malformed_bands() {
    let mut config = ControllerConfig::default();
    config.thresholds.quiet_max = 0.5;
    let result = VoiceActionController::new(config);
    assert!(matches!(result, Err(ConfigError::BandOrder { .. })));
}

#[test]
fn test_fresh_entry_scenario() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    let states = run(&mut controller, &mut entity, &[0.0, 0.0, 0.2, 0.2], 0.016);
    assert_eq!(
        states,
        vec![
            VoiceState::Neutral,
            VoiceState::Neutral,
            VoiceState::Medium,
            VoiceState::Medium
        ]
    );
    assert!(controller.is_activated());
    assert_eq!(entity.count(Action::Jump), 1, "second Medium tick is cooling down");
}

#[test]
fn test_activation_gate_pins_neutral() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    // Quiet-band readings below the activation threshold
    let states = run(&mut controller, &mut entity, &[0.03, 0.04, 0.05, 0.045], 0.016);
    assert!(states.iter().all(|&s| s == VoiceState::Neutral));
    assert!(!controller.is_activated());
    assert!(entity.calls().is_empty());

    let report = controller.update(TickInput::new(0.06, 0.016), &mut entity);
    assert!(report.activated);
    assert_eq!(report.state, VoiceState::Quiet);
    assert!(report
        .events
        .contains(&ControllerEvent::Activated { amplitude: 0.06 }));
}

#[test]
fn test_gate_never_recloses() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.3, 0.016), &mut entity);
    assert!(controller.is_activated());

    // Silence long enough to return to Neutral
    run(&mut controller, &mut entity, &[0.0; 64], 0.016);
    assert_eq!(controller.state(), VoiceState::Neutral);
    assert!(controller.is_activated());

    // Quiet-band reading below the activation threshold is honored now
    let report = controller.update(TickInput::new(0.03, 0.016), &mut entity);
    assert_eq!(report.state, VoiceState::Quiet);
}

#[test]
fn test_sub_quiet_min_never_fires() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    let below: Vec<f32> = (0..200).map(|i| 0.0195 * (i % 7) as f32 / 6.0).collect();
    let states = run(&mut controller, &mut entity, &below, 0.016);
    assert!(states.iter().all(|&s| s == VoiceState::Neutral));

    // Activate, then stay below quiet_min again
    controller.update(TickInput::new(0.3, 0.016), &mut entity);
    entity.clear();
    for &a in &below {
        let report = controller.update(TickInput::new(a, 0.016), &mut entity);
        assert_eq!(report.state, VoiceState::Neutral);
        assert!(!report.fired_trigger());
    }
    assert!(entity.calls().iter().all(|a| !a.is_trigger()));
}

#[test]
fn test_neutral_return_exact_hold_time() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.1, 0.125), &mut entity);
    assert_eq!(controller.state(), VoiceState::Quiet);
    entity.clear();

    // neutral_hold_time = 0.5: three silent ticks of 0.125 are not enough.
    // quiet_min override already reports Neutral, but stand_up has not run.
    for _ in 0..3 {
        controller.update(TickInput::new(0.0, 0.125), &mut entity);
    }
    assert_eq!(entity.count(Action::StandUp), 0);

    let report = controller.update(TickInput::new(0.0, 0.125), &mut entity);
    assert_eq!(report.state, VoiceState::Neutral);
    assert_eq!(entity.count(Action::StandUp), 1);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, ControllerEvent::SilenceReturn { .. })));

    // Continued silence does not stand up again
    run(&mut controller, &mut entity, &[0.0; 10], 0.125);
    assert_eq!(entity.count(Action::StandUp), 1);
}

#[test]
fn test_brief_dropout_does_not_return() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.25, 0.125), &mut entity);
    for _ in 0..10 {
        run(&mut controller, &mut entity, &[0.0, 0.0, 0.0, 0.25], 0.125);
    }
    assert_eq!(entity.count(Action::StandUp), 0);
}

#[test]
fn test_silence_return_unlatches_crouch() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.1, 0.125).with_confirm(true), &mut entity);
    assert!(entity.is_crouched());
    assert!(controller.snapshot().crouched);

    run(&mut controller, &mut entity, &[0.0; 4], 0.125);
    assert!(!entity.is_crouched());
    assert!(!controller.snapshot().crouched);
}

#[test]
fn test_continuous_hysteresis_holds_medium() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.25, 0.016), &mut entity);
    let states = run(&mut controller, &mut entity, &[0.17, 0.39, 0.165, 0.394], 0.016);
    assert!(states.iter().all(|&s| s == VoiceState::Medium));

    let report = controller.update(TickInput::new(0.40, 0.016), &mut entity);
    assert_eq!(report.state, VoiceState::Loud);
    assert!(report.actions.contains(&Action::Shoot));
    assert!(report.events.contains(&ControllerEvent::StateChanged {
        from: VoiceState::Medium,
        to: VoiceState::Loud
    }));
}

#[test]
fn test_continuous_quiet_hold_crouches() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    // quiet_hold_time = 0.2
    run(&mut controller, &mut entity, &[0.1, 0.1], 0.0625);
    assert!(!entity.is_crouched());
    run(&mut controller, &mut entity, &[0.1, 0.1], 0.0625);
    assert!(entity.is_crouched());
    assert_eq!(entity.count(Action::SetCrouch(true)), 1);

    // Rising to Medium releases the crouch and jumps
    controller.update(TickInput::new(0.25, 0.0625), &mut entity);
    assert!(!entity.is_crouched());
    assert_eq!(entity.count(Action::Jump), 1);
}

#[test]
fn test_huge_dt_fires_once() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.5, 0.016), &mut entity);
    assert_eq!(entity.count(Action::Shoot), 1);

    let report = controller.update(TickInput::new(0.5, 1000.0), &mut entity);
    assert_eq!(
        report
            .actions
            .iter()
            .filter(|&&a| a == Action::Shoot)
            .count(),
        1
    );
    // The cooldown restarted from its full duration
    let report = controller.update(TickInput::new(0.5, 0.016), &mut entity);
    assert!(report.actions.is_empty());
}

#[test]
fn test_bad_dt_counts_as_zero() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.25, 0.016), &mut entity);
    for dt in [f32::NAN, -5.0, f32::INFINITY] {
        let report = controller.update(TickInput::new(0.25, dt), &mut entity);
        assert!(report.actions.is_empty(), "dt {} must not expire cooldowns", dt);
    }
    assert_eq!(entity.count(Action::Jump), 1);
}

#[test]
fn test_confirm_mode_ignores_ticks_without_confirm() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    run(&mut controller, &mut entity, &[0.25, 0.5, 0.5, 0.25], 0.1);
    assert!(entity.calls().is_empty());
    assert_eq!(controller.state(), VoiceState::Medium);
}

#[test]
fn test_confirm_uses_instantaneous_band() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    // At 0.17 the tracker holds Medium inside the dead zone while the pure band says Quiet
    controller.update(TickInput::new(0.25, 0.1), &mut entity);
    let report = controller.update(TickInput::new(0.17, 0.1).with_confirm(true), &mut entity);
    assert_eq!(report.state, VoiceState::Medium);
    assert!(report.events.contains(&ControllerEvent::ConfirmResolved {
        band: VoiceState::Quiet
    }));
    assert_eq!(report.actions, vec![Action::ToggleCrouch]);
}

#[test]
fn test_confirm_cooldown_allows_one_dispatch() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.5, 0.1).with_confirm(true), &mut entity);
    let report = controller.update(TickInput::new(0.25, 0.1).with_confirm(true), &mut entity);
    assert!(report.actions.is_empty());
    assert!(report.events.contains(&ControllerEvent::ConfirmIgnored {
        reason: ConfirmIgnoredReason::CoolingDown
    }));
    assert_eq!(entity.calls(), &[Action::Shoot]);
}

#[test]
fn test_confirm_before_activation_is_ignored() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    let report = controller.update(TickInput::new(0.04, 0.1).with_confirm(true), &mut entity);
    assert!(report.events.contains(&ControllerEvent::ConfirmIgnored {
        reason: ConfirmIgnoredReason::NotActivated
    }));
    assert!(entity.calls().is_empty());
}

#[test]
fn test_crouch_latch_cleared_by_non_quiet_confirms() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    for loud in [0.25_f32, 0.5] {
        controller.update(TickInput::new(0.1, 0.5).with_confirm(true), &mut entity);
        assert!(entity.is_crouched());

        controller.update(TickInput::new(loud, 0.5).with_confirm(true), &mut entity);
        assert!(!entity.is_crouched());
        assert!(!controller.snapshot().crouched);
    }
    assert_eq!(entity.count(Action::Jump), 1);
    assert_eq!(entity.count(Action::Shoot), 1);
}

#[test]
fn test_neutral_confirm_releases_crouch() {
    let mut controller = VoiceActionController::new(instant_confirm_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.1, 0.5).with_confirm(true), &mut entity);
    assert!(entity.is_crouched());

    // Above neutral_return_threshold, below quiet_min
    let report = controller.update(TickInput::new(0.015, 0.5).with_confirm(true), &mut entity);
    assert_eq!(report.state, VoiceState::Neutral);
    assert!(report.events.contains(&ControllerEvent::ConfirmResolved {
        band: VoiceState::Neutral
    }));
    assert_eq!(report.actions, vec![Action::SetCrouch(false)]);
    assert!(!report.fired_trigger());
    assert!(!entity.is_crouched());
    assert!(!controller.snapshot().crouched);
}

#[test]
fn test_confirm_in_continuous_mode_is_reported() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    let report = controller.update(TickInput::new(0.25, 0.1).with_confirm(true), &mut entity);
    assert!(report.events.contains(&ControllerEvent::ConfirmIgnored {
        reason: ConfirmIgnoredReason::ContinuousMode
    }));
    assert_eq!(report.actions, vec![Action::Jump]);
}

#[test]
fn test_smoothing_delays_response() {
    let mut controller = VoiceActionController::new(ControllerConfig {
        smoothing: 0.5,
        ..ControllerConfig::default()
    })
    .unwrap();
    let mut entity = ActionRecorder::new();

    // 0.5 raw -> 0.25, 0.375, 0.4375 smoothed
    let report = controller.update(TickInput::new(0.5, 0.016), &mut entity);
    assert!((report.smoothed_amplitude - 0.25).abs() < 1e-6);
    assert_eq!(report.raw_amplitude, 0.5);
    assert_eq!(report.state, VoiceState::Medium);

    controller.update(TickInput::new(0.5, 0.016), &mut entity);
    let report = controller.update(TickInput::new(0.5, 0.016), &mut entity);
    assert_eq!(report.state, VoiceState::Loud);
}

#[test]
fn test_snapshot_meter_level() {
    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    controller.update(TickInput::new(0.375 * 1.15 / 2.0, 0.016), &mut entity);
    let snapshot = controller.snapshot();
    assert!((snapshot.meter_level - 0.5).abs() < 1e-4);
    assert_eq!(snapshot.mode, DispatchMode::Continuous);

    controller.update(TickInput::new(5.0, 0.016), &mut entity);
    assert_eq!(controller.snapshot().meter_level, 1.0);
}

#[test]
fn test_tick_source_drives_scripted_amplitudes() {
    use crate::audio::ScriptedSource;

    let mut controller = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();
    let mut source = ScriptedSource::new(vec![0.0, 0.0, 0.2, 0.2]);

    let mut states = Vec::new();
    while !source.is_exhausted() {
        states.push(
            controller
                .tick_source(&mut source, 0.016, false, &mut entity)
                .state,
        );
    }
    assert_eq!(
        states,
        vec![
            VoiceState::Neutral,
            VoiceState::Neutral,
            VoiceState::Medium,
            VoiceState::Medium
        ]
    );
}

#[test]
fn test_instances_are_independent() {
    let mut a = VoiceActionController::new(instant_config()).unwrap();
    let b = VoiceActionController::new(instant_config()).unwrap();
    let mut entity = ActionRecorder::new();

    a.update(TickInput::new(0.5, 0.016), &mut entity);
    assert!(a.is_activated());
    assert!(!b.is_activated());
    assert_eq!(b.state(), VoiceState::Neutral);
}
