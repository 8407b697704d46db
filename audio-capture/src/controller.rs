//! Capture lifecycle control
//!
//! [`CaptureController`] drives a single microphone capture at a time:
//! `start()` opens the input source, samples accumulate until either a
//! manual `stop()` or the fixed recording ceiling, and the result is a
//! single WAV blob. The controller is single-threaded by design; the
//! owning event loop calls [`CaptureController::poll`] to observe a
//! ceiling-triggered stop.

use crate::error::{CaptureError, Result};
use crate::shared::{CaptureShared, SampleSink};
use crate::source::{InputHandle, InputSource};
use crate::wav;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Maximum length of a single capture.
pub const MAX_RECORDING: Duration = Duration::from_secs(30);

/// Why a capture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called before the ceiling
    Manual,
    /// The recording ceiling was reached
    Ceiling,
}

/// A finished capture: one WAV blob plus its bookkeeping.
#[derive(Debug, Clone)]
pub struct RecordedAudio {
    /// WAV-encoded bytes (16-bit PCM mono)
    pub data: Vec<u8>,
    /// Whole seconds the capture ran, clamped to the ceiling
    pub duration_secs: u64,
    /// Sample rate of the encoded audio in Hz
    pub sample_rate: u32,
    pub stop_reason: StopReason,
}

/// Events surfaced by [`CaptureController::poll`].
#[derive(Debug)]
pub enum CaptureEvent {
    /// The ceiling was reached and the capture was finalized
    Stopped { audio: RecordedAudio },
    /// The capture hit the ceiling but finalization failed
    Failed(CaptureError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Recording,
}

pub struct CaptureController {
    source: Box<dyn InputSource>,
    shared: Arc<CaptureShared>,
    handle: Option<Box<dyn InputHandle>>,
    state: CaptureState,
    ceiling: Duration,
    sample_rate: u32,
    started_at: Option<Instant>,
    last_elapsed: u64,
}

impl CaptureController {
    /// Create a controller over the given input source with the default
    /// 30-second ceiling.
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self::with_ceiling(source, MAX_RECORDING)
    }

    /// Create a controller with a custom ceiling. Exposed for tests; the
    /// product ceiling is [`MAX_RECORDING`].
    pub fn with_ceiling(source: Box<dyn InputSource>, ceiling: Duration) -> Self {
        Self {
            source,
            shared: Arc::new(CaptureShared::new()),
            handle: None,
            state: CaptureState::Idle,
            ceiling,
            sample_rate: 0,
            started_at: None,
            last_elapsed: 0,
        }
    }

    /// Start a new capture.
    ///
    /// The sample buffer and elapsed counter are reset to zero first. If
    /// the input source cannot be opened (device missing, access denied),
    /// the error is returned and the controller stays idle with no
    /// partial recording. Calling `start()` while already recording is a
    /// logged no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.state == CaptureState::Recording {
            warn!("Already recording, ignoring start request");
            return Ok(());
        }

        self.shared.buffer.lock().clear();
        self.shared.ceiling_hit.store(false, Ordering::SeqCst);
        *self.shared.deadline.lock() = Instant::now() + self.ceiling;
        self.shared.recording.store(true, Ordering::SeqCst);
        self.last_elapsed = 0;

        let sink = SampleSink::new(Arc::clone(&self.shared));
        match self.source.open(sink) {
            Ok(active) => {
                self.sample_rate = active.sample_rate;
                self.handle = Some(active.handle);
                self.started_at = Some(Instant::now());
                self.state = CaptureState::Recording;
                info!("Capture started at {}Hz", self.sample_rate);
                Ok(())
            }
            Err(e) => {
                self.shared.recording.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Stop the capture manually and finalize the WAV blob.
    ///
    /// Honored any time before the ceiling; returns
    /// [`CaptureError::NotRecording`] when no capture is active.
    pub fn stop(&mut self) -> Result<RecordedAudio> {
        if self.state != CaptureState::Recording {
            return Err(CaptureError::NotRecording);
        }
        self.finish(StopReason::Manual)
    }

    /// Observe a ceiling-triggered stop.
    ///
    /// Returns at most one event per capture. A ceiling crossing observed
    /// after a manual `stop()` already ran is discarded here, so a stale
    /// timeout can never stop the following capture.
    pub fn poll(&mut self) -> Option<CaptureEvent> {
        if self.state != CaptureState::Recording {
            return None;
        }

        let ceiling_passed = self.shared.ceiling_hit.load(Ordering::SeqCst)
            || Instant::now() >= *self.shared.deadline.lock();
        if !ceiling_passed {
            return None;
        }

        match self.finish(StopReason::Ceiling) {
            Ok(audio) => Some(CaptureEvent::Stopped { audio }),
            Err(e) => Some(CaptureEvent::Failed(e)),
        }
    }

    fn finish(&mut self, reason: StopReason) -> Result<RecordedAudio> {
        self.shared.recording.store(false, Ordering::SeqCst);
        // Release the device before anything that can fail
        self.handle = None;

        let elapsed = self.elapsed_secs();
        let samples: Vec<f32> = std::mem::take(&mut *self.shared.buffer.lock());

        self.state = CaptureState::Idle;
        self.started_at = None;
        self.last_elapsed = elapsed;

        let data = wav::samples_to_wav(&samples, self.sample_rate)?;
        info!(
            "Capture stopped ({:?}): {}s, {} samples",
            reason,
            elapsed,
            samples.len()
        );

        Ok(RecordedAudio {
            data,
            duration_secs: elapsed,
            sample_rate: self.sample_rate,
            stop_reason: reason,
        })
    }

    /// Whole seconds of the active capture, clamped to the ceiling.
    /// After a stop this reports the final duration of the last capture;
    /// it resets to zero when the next capture starts.
    pub fn elapsed_secs(&self) -> u64 {
        match self.started_at {
            Some(t) => t.elapsed().as_secs().min(self.ceiling.as_secs()),
            None => self.last_elapsed,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }
}
