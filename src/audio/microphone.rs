// MicrophoneSource - live capture through cpal
//
// Opens the default input device and feeds its first channel into a
// CaptureWindow. Failure to open a device is reported as an AudioError, but
// `open_or_silent` is what callers normally want: it logs and hands back a
// permanently silent source so the controller keeps ticking in Neutral.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::capture::{capture_channel, push_first_channel, CaptureWindow};
use super::source::{AmplitudeSource, SilentSource};
use crate::config::AudioConfig;
use crate::error::{log_audio_error, AudioError};

pub struct MicrophoneSource {
    /// Kept alive for the lifetime of the source; dropping it stops capture
    _stream: cpal::Stream,
    window: CaptureWindow,
    failed: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    sample_rate: u32,
}

impl MicrophoneSource {
    pub fn open(config: &AudioConfig) -> Result<Self, AudioError> {
        if config.ring_capacity == 0 || config.sample_window == 0 {
            return Err(AudioError::StreamOpenFailed {
                reason: format!(
                    "ring_capacity ({}) and sample_window ({}) must be non-zero",
                    config.ring_capacity, config.sample_window
                ),
            });
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(AudioError::DeviceUnavailable)?;

        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::StreamOpenFailed {
                reason: format!("Failed to get default input config: {:?}", e),
            })?;

        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::StreamOpenFailed {
                reason: "Only F32 sample format is currently supported for input".to_string(),
            });
        }

        let stream_config: cpal::StreamConfig = supported.into();
        let channels = stream_config.channels as usize;
        let sample_rate = stream_config.sample_rate.0;
        if sample_rate != config.sample_rate {
            log::info!(
                "[Microphone] Device runs at {} Hz (configured {} Hz)",
                sample_rate,
                config.sample_rate
            );
        }

        let (mut producer, window) = capture_channel(config.ring_capacity, config.sample_window);
        let failed = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU64::new(0));

        let dropped_cb = Arc::clone(&dropped);
        let failed_cb = Arc::clone(&failed);
        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let lost = push_first_channel(&mut producer, data, channels);
                    if lost > 0 {
                        dropped_cb.fetch_add(lost as u64, Ordering::Relaxed);
                    }
                },
                move |err| {
                    log::error!("[Microphone] Input stream error: {}", err);
                    failed_cb.store(true, Ordering::Relaxed);
                },
                None,
            )
            .map_err(|e| AudioError::StreamOpenFailed {
                reason: format!("{:?}", e),
            })?;

        stream.play().map_err(|e| AudioError::StreamOpenFailed {
            reason: format!("Failed to start input stream: {:?}", e),
        })?;

        log::info!(
            "[Microphone] Capturing {} channel(s) at {} Hz, window {} samples",
            channels,
            sample_rate,
            config.sample_window
        );

        Ok(Self {
            _stream: stream,
            window,
            failed,
            dropped,
            sample_rate,
        })
    }

    /// Open the default device, or fall back to a silent source
    pub fn open_or_silent(config: &AudioConfig) -> Box<dyn AmplitudeSource> {
        match Self::open(config) {
            Ok(source) => Box::new(source),
            Err(err) => {
                log_audio_error(&err, "MicrophoneSource::open_or_silent");
                log::warn!("[Microphone] Continuing with a silent signal");
                Box::new(SilentSource)
            }
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples lost because the tick loop fell behind the capture callback
    pub fn dropped_samples(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl AmplitudeSource for MicrophoneSource {
    fn sample(&mut self) -> f32 {
        if self.failed.load(Ordering::Relaxed) {
            return 0.0;
        }
        self.window.sample()
    }
}
