// WavSource - replay recorded audio as an amplitude stream
//
// Loads a mono WAV file up front, then walks through it in elapsed time:
// each `advance(dt)` moves the playhead by `dt * sample_rate` samples and
// `sample()` reports the RMS of the `window` samples ending at the playhead.
// Until a full window has been played the reading is 0.0, matching a live
// capture whose buffer has not filled yet.

use std::path::Path;

use super::source::{rms, AmplitudeSource};
use crate::error::AudioError;

pub struct WavSource {
    samples: Vec<f32>,
    sample_rate: u32,
    window: usize,
    /// Playhead in samples; fractional so small dt values still accumulate
    position: f64,
}

impl WavSource {
    /// Load a mono WAV file (16/24/32-bit integer or 32-bit float)
    pub fn open<P: AsRef<Path>>(path: P, window: usize) -> Result<Self, AudioError> {
        let (samples, sample_rate) = read_wav(path.as_ref())?;
        log::info!(
            "[WavSource] Loaded {} samples at {} Hz from {}",
            samples.len(),
            sample_rate,
            path.as_ref().display()
        );
        Ok(Self::from_samples(samples, sample_rate, window))
    }

    pub fn from_samples(samples: Vec<f32>, sample_rate: u32, window: usize) -> Self {
        Self {
            samples,
            sample_rate: sample_rate.max(1),
            window: window.max(1),
            position: 0.0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    fn playhead(&self) -> usize {
        (self.position as usize).min(self.samples.len())
    }
}

impl AmplitudeSource for WavSource {
    fn sample(&mut self) -> f32 {
        let end = self.playhead();
        if end < self.window {
            return 0.0;
        }
        rms(&self.samples[end - self.window..end])
    }

    fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.position += dt as f64 * self.sample_rate as f64;
        }
    }

    fn is_exhausted(&self) -> bool {
        self.playhead() >= self.samples.len()
    }
}

fn read_wav(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let wav_err = |err: hound::Error| AudioError::WavRead {
        reason: format!("{}: {}", path.display(), err),
    };

    let mut reader = hound::WavReader::open(path).map_err(wav_err)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(AudioError::WavRead {
            reason: format!(
                "{} must be mono (found {} channels)",
                path.display(),
                spec.channels
            ),
        });
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()
            .map_err(wav_err)?,
        hound::SampleFormat::Int => {
            let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            match spec.bits_per_sample {
                16 => reader
                    .samples::<i16>()
                    .map(|sample| sample.map(|value| value as f32 / max))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(wav_err)?,
                24 | 32 => reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|value| value as f32 / max))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(wav_err)?,
                other => {
                    return Err(AudioError::WavRead {
                        reason: format!(
                            "Unsupported bits per sample {} in {}",
                            other,
                            path.display()
                        ),
                    })
                }
            }
        }
    };

    Ok((samples, spec.sample_rate))
}
