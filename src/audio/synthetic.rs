//! Synthetic amplitude source for demos and soak tests.
//!
//! Produces a jittery amplitude around a level pattern, standing in for a
//! microphone. Noise comes from a seeded `StdRng`, so a given seed always
//! yields the same stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

use super::source::AmplitudeSource;

/// Level used for the silence stretches of every pattern
const SILENCE_LEVEL: f32 = 0.002;
const QUIET_LEVEL: f32 = 0.1;
const MEDIUM_LEVEL: f32 = 0.27;
const LOUD_LEVEL: f32 = 0.5;

/// Seconds spent on each step of the sweep pattern
const SWEEP_STEP_SECS: f32 = 1.0;

/// Deterministic level patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticPattern {
    Silence,
    Quiet,
    Medium,
    Loud,
    /// silence, quiet, medium, loud, medium, quiet, repeating
    Sweep,
    /// 0.2 s loud bursts once per second over silence
    Bursts,
}

impl SyntheticPattern {
    /// Noise-free level at `elapsed` seconds
    pub fn level_at(self, elapsed: f32) -> f32 {
        match self {
            SyntheticPattern::Silence => SILENCE_LEVEL,
            SyntheticPattern::Quiet => QUIET_LEVEL,
            SyntheticPattern::Medium => MEDIUM_LEVEL,
            SyntheticPattern::Loud => LOUD_LEVEL,
            SyntheticPattern::Sweep => {
                const STEPS: [f32; 6] = [
                    SILENCE_LEVEL,
                    QUIET_LEVEL,
                    MEDIUM_LEVEL,
                    LOUD_LEVEL,
                    MEDIUM_LEVEL,
                    QUIET_LEVEL,
                ];
                let step = (elapsed / SWEEP_STEP_SECS) as usize % STEPS.len();
                STEPS[step]
            }
            SyntheticPattern::Bursts => {
                if elapsed.rem_euclid(1.0) < 0.2 {
                    LOUD_LEVEL
                } else {
                    SILENCE_LEVEL
                }
            }
        }
    }
}

impl FromStr for SyntheticPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silence" => Ok(SyntheticPattern::Silence),
            "quiet" => Ok(SyntheticPattern::Quiet),
            "medium" => Ok(SyntheticPattern::Medium),
            "loud" => Ok(SyntheticPattern::Loud),
            "sweep" => Ok(SyntheticPattern::Sweep),
            "bursts" => Ok(SyntheticPattern::Bursts),
            other => Err(format!(
                "unknown pattern '{}' (expected silence, quiet, medium, loud, sweep or bursts)",
                other
            )),
        }
    }
}

pub struct SyntheticSource {
    pattern: SyntheticPattern,
    rng: StdRng,
    jitter: f32,
    elapsed: f32,
}

impl SyntheticSource {
    /// # Arguments
    /// * `pattern` - Underlying level pattern
    /// * `seed` - RNG seed for the jitter
    /// * `jitter` - Peak deviation added to every reading; non-finite means none
    pub fn new(pattern: SyntheticPattern, seed: u64, jitter: f32) -> Self {
        let jitter = if jitter.is_finite() {
            jitter.abs()
        } else {
            log::warn!("[Synthetic] Ignoring non-finite jitter {}", jitter);
            0.0
        };
        Self {
            pattern,
            rng: StdRng::seed_from_u64(seed),
            jitter,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl AmplitudeSource for SyntheticSource {
    fn sample(&mut self) -> f32 {
        let level = self.pattern.level_at(self.elapsed);
        let noise = if self.jitter > 0.0 {
            self.rng.gen_range(-self.jitter..self.jitter)
        } else {
            0.0
        };
        (level + noise).max(0.0)
    }

    fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }
}
