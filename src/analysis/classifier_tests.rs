use super::*;

fn thresholds() -> BandThresholds {
    BandThresholds::default()
}

#[test]
fn test_classify_silence_is_neutral() {
    let t = thresholds();

    assert_eq!(t.classify(0.0), VoiceState::Neutral);
    assert_eq!(
        t.classify(0.019),
        VoiceState::Neutral,
        "Amplitude just under quiet_min ({}) should be Neutral",
        t.quiet_min
    );
}

#[test]
fn test_classify_quiet_band_is_inclusive() {
    let t = thresholds();

    assert_eq!(
        t.classify(t.quiet_min),
        VoiceState::Quiet,
        "quiet_min itself belongs to Quiet"
    );
    assert_eq!(t.classify(0.1), VoiceState::Quiet);
    assert_eq!(
        t.classify(t.quiet_max),
        VoiceState::Quiet,
        "quiet_max itself belongs to Quiet"
    );
}

#[test]
fn test_classify_medium_band() {
    let t = thresholds();

    assert_eq!(t.classify(0.181), VoiceState::Medium);
    assert_eq!(t.classify(0.2), VoiceState::Medium);
    assert_eq!(t.classify(0.374), VoiceState::Medium);
}

#[test]
fn test_classify_loud_band_is_inclusive() {
    let t = thresholds();

    assert_eq!(
        t.classify(t.loud_min),
        VoiceState::Loud,
        "loud_min itself belongs to Loud"
    );
    assert_eq!(t.classify(0.9), VoiceState::Loud);
    assert_eq!(t.classify(f32::INFINITY), VoiceState::Loud);
}

#[test]
fn test_classify_nan_is_neutral() {
    assert_eq!(thresholds().classify(f32::NAN), VoiceState::Neutral);
}

#[test]
fn test_classify_is_stateless() {
    let t = thresholds();
    let sequence = [0.5, 0.0, 0.1, 0.5, 0.25, 0.1];
    let first: Vec<VoiceState> = sequence.iter().map(|&a| t.classify(a)).collect();
    let second: Vec<VoiceState> = sequence.iter().rev().map(|&a| t.classify(a)).collect();

    let reversed: Vec<VoiceState> = second.into_iter().rev().collect();
    assert_eq!(first, reversed, "Order of calls must not affect results");
}

#[test]
fn test_free_function_matches_method() {
    let t = thresholds();
    for a in [0.0, 0.02, 0.18, 0.2, 0.375, 1.0] {
        assert_eq!(classify(a, &t), t.classify(a));
    }
}

#[test]
fn test_equal_quiet_bounds_leave_single_point_quiet_band() {
    let t = BandThresholds {
        quiet_min: 0.1,
        quiet_max: 0.1,
        loud_min: 0.3,
    };

    assert_eq!(t.classify(0.099), VoiceState::Neutral);
    assert_eq!(t.classify(0.1), VoiceState::Quiet);
    assert_eq!(t.classify(0.101), VoiceState::Medium);
}

#[test]
fn test_band_rank_orders_active_states() {
    assert_eq!(VoiceState::Neutral.band_rank(), None);
    assert!(VoiceState::Quiet.band_rank() < VoiceState::Medium.band_rank());
    assert!(VoiceState::Medium.band_rank() < VoiceState::Loud.band_rank());
    assert!(!VoiceState::Neutral.is_active());
    assert!(VoiceState::Loud.is_active());
}

#[test]
fn test_voice_state_serializes_snake_case() {
    let json = serde_json::to_string(&VoiceState::Medium).unwrap();
    assert_eq!(json, "\"medium\"");
    assert_eq!(VoiceState::Loud.to_string(), "loud");
}
