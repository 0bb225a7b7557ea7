// Amplitude sources - per-tick signal energy readings
//
// The controller only needs one non-negative number per tick: the RMS of the
// most recent window of captured audio. Sources never block; a source with
// nothing captured yet (or no device at all) reports 0.0.
//
// Tick loop contract:
//   raw = source.sample();     // energy at the current instant
//   ... controller update ...
//   source.advance(dt);        // clock-driven sources move forward
//
// Live capture ignores `advance` since wall-clock time moves on its own.

/// Root-mean-square magnitude of a sample window
///
/// Returns 0.0 for an empty window.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Producer of raw amplitude readings
pub trait AmplitudeSource {
    /// RMS of the latest available window; 0.0 when none is available
    fn sample(&mut self) -> f32;

    /// Move a clock-driven source forward by `dt` seconds
    fn advance(&mut self, _dt: f32) {}

    /// True once a finite source has nothing left to play
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl<S: AmplitudeSource + ?Sized> AmplitudeSource for Box<S> {
    fn sample(&mut self) -> f32 {
        (**self).sample()
    }

    fn advance(&mut self, dt: f32) {
        (**self).advance(dt)
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

/// Exponential moving average over raw amplitude
///
/// `smoothed = lerp(smoothed, raw, 1 - smoothing)`, applied once per tick.
/// Corrupt readings (NaN, infinite, negative) are folded in as 0.0.
#[derive(Debug, Clone)]
pub struct Smoother {
    smoothing: f32,
    value: f32,
}

impl Smoother {
    /// # Arguments
    /// * `smoothing` - 0.0 snaps to each raw sample, 1.0 never moves
    pub fn new(smoothing: f32) -> Self {
        Self {
            smoothing: smoothing.clamp(0.0, 1.0),
            value: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, raw: f32) -> f32 {
        let raw = sanitize(raw);
        // Weighted form keeps both endpoints exact
        self.value = self.value * self.smoothing + raw * (1.0 - self.smoothing);
        self.value
    }
}

/// Clamp a reading into the valid non-negative finite range
pub fn sanitize(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.max(0.0)
    } else {
        0.0
    }
}

/// Permanently zero signal, used when no capture device exists
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSource;

impl AmplitudeSource for SilentSource {
    fn sample(&mut self) -> f32 {
        0.0
    }
}

/// Replays a fixed list of amplitudes, one per tick, then silence
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    index: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AmplitudeSource for ScriptedSource {
    fn sample(&mut self) -> f32 {
        self.values.get(self.index).copied().unwrap_or(0.0)
    }

    fn advance(&mut self, _dt: f32) {
        self.index = self.index.saturating_add(1);
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.values.len()
    }
}
