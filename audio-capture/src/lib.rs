//! Audio capture for NeuroVoice Engine
//!
//! Wraps microphone input behind a single-capture controller with a fixed
//! recording ceiling, and provides the file-intake alternative. A
//! submission carries exactly one [`AudioSource`]; enforcing that mutual
//! exclusion is the wizard's job, not this crate's.

pub mod controller;
pub mod error;
pub mod intake;
pub mod shared;
pub mod source;
pub mod wav;

pub use controller::{CaptureController, CaptureEvent, RecordedAudio, StopReason, MAX_RECORDING};
pub use error::{CaptureError, Result};
pub use intake::{AudioFile, SUPPORTED_EXTENSIONS};
pub use shared::SampleSink;
pub use source::{ActiveInput, InputHandle, InputSource, MicrophoneSource};
pub use wav::WAV_MIME;

/// The audio attached to a submission: either a finished capture or a
/// user-selected file, never both.
#[derive(Debug, Clone)]
pub enum AudioSource {
    Recorded(RecordedAudio),
    File(AudioFile),
}

impl AudioSource {
    pub fn data(&self) -> &[u8] {
        match self {
            AudioSource::Recorded(r) => &r.data,
            AudioSource::File(f) => &f.data,
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            AudioSource::Recorded(_) => WAV_MIME,
            AudioSource::File(f) => &f.mime_type,
        }
    }

    /// Original file name, when the source is a selected file.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            AudioSource::Recorded(_) => None,
            AudioSource::File(f) => Some(&f.file_name),
        }
    }

    pub fn size(&self) -> u64 {
        self.data().len() as u64
    }

    /// Capture duration in whole seconds; unknown for selected files.
    pub fn duration_secs(&self) -> Option<u64> {
        match self {
            AudioSource::Recorded(r) => Some(r.duration_secs),
            AudioSource::File(_) => None,
        }
    }
}
