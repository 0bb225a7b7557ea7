// CaptureWindow - lock-free handoff from the audio callback to the tick loop
//
// The capture callback runs on the audio thread and must never block or
// allocate. It pushes mono samples into an SPSC ring (rtrb); the tick loop
// drains whatever has arrived into a fixed sliding window and computes RMS
// over it. If the ring is full the callback drops samples rather than wait.
//
// Flow:
// 1. Audio thread: push_first_channel(producer, interleaved, channels)
// 2. Tick loop:    window.sample() drains the ring, returns RMS of the
//                  latest `window_size` samples (0.0 until the window fills)

use rtrb::{Consumer, Producer, RingBuffer};

use super::source::{rms, AmplitudeSource};

/// Create the producer half for the audio thread and the window for the tick loop
///
/// # Panics
/// Panics if `ring_capacity` or `window_size` is 0
pub fn capture_channel(
    ring_capacity: usize,
    window_size: usize,
) -> (Producer<f32>, CaptureWindow) {
    assert!(ring_capacity > 0, "ring_capacity must be greater than 0");
    assert!(window_size > 0, "window_size must be greater than 0");

    let (producer, consumer) = RingBuffer::new(ring_capacity);
    (producer, CaptureWindow::new(consumer, window_size))
}

/// Push the first channel of an interleaved block into the ring
///
/// # Returns
/// Number of samples dropped because the ring was full
pub fn push_first_channel(producer: &mut Producer<f32>, data: &[f32], channels: usize) -> usize {
    let channels = channels.max(1);
    let mut dropped = 0;
    for frame in data.chunks(channels) {
        let sample = frame.first().copied().unwrap_or(0.0);
        if producer.push(sample).is_err() {
            dropped += 1;
        }
    }
    dropped
}

/// Sliding window over the most recent captured samples
pub struct CaptureWindow {
    consumer: Consumer<f32>,
    window: Vec<f32>,
    write_pos: usize,
    filled: usize,
}

impl CaptureWindow {
    fn new(consumer: Consumer<f32>, window_size: usize) -> Self {
        Self {
            consumer,
            window: vec![0.0; window_size],
            write_pos: 0,
            filled: 0,
        }
    }

    /// Pull every sample currently in the ring into the window
    ///
    /// # Returns
    /// Number of samples drained
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(sample) = self.consumer.pop() {
            self.window[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % self.window.len();
            drained += 1;
        }
        self.filled = (self.filled + drained).min(self.window.len());
        drained
    }

    pub fn is_filled(&self) -> bool {
        self.filled == self.window.len()
    }
}

impl AmplitudeSource for CaptureWindow {
    fn sample(&mut self) -> f32 {
        self.drain();
        if !self.is_filled() {
            return 0.0;
        }
        // Window order does not matter for RMS
        rms(&self.window)
    }
}
