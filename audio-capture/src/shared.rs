//! State shared between the capture controller and the stream callback.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

pub(crate) struct CaptureShared {
    /// Samples are accepted only while this is set
    pub(crate) recording: AtomicBool,
    /// Set exactly once when the recording ceiling is crossed
    pub(crate) ceiling_hit: AtomicBool,
    /// Wall-clock instant after which no more samples are accepted
    pub(crate) deadline: Mutex<Instant>,
    /// Accumulated mono samples
    pub(crate) buffer: Mutex<Vec<f32>>,
}

impl CaptureShared {
    pub(crate) fn new() -> Self {
        Self {
            recording: AtomicBool::new(false),
            ceiling_hit: AtomicBool::new(false),
            deadline: Mutex::new(Instant::now()),
            buffer: Mutex::new(Vec::new()),
        }
    }
}

/// Sample destination handed to an [`crate::source::InputSource`].
///
/// The sink enforces the recording ceiling on the callback side: once the
/// deadline passes, accumulation stops and the ceiling flag is raised
/// exactly once, regardless of how many more callbacks arrive.
#[derive(Clone)]
pub struct SampleSink {
    shared: Arc<CaptureShared>,
}

impl SampleSink {
    pub(crate) fn new(shared: Arc<CaptureShared>) -> Self {
        Self { shared }
    }

    /// Append a chunk of mono samples to the capture buffer.
    pub fn push(&self, samples: &[f32]) {
        if !self.shared.recording.load(Ordering::SeqCst) {
            return;
        }

        if Instant::now() >= *self.shared.deadline.lock() {
            if self
                .shared
                .recording
                .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                self.shared.ceiling_hit.store(true, Ordering::SeqCst);
            }
            return;
        }

        self.shared.buffer.lock().extend_from_slice(samples);
    }
}
