use thiserror::Error;

/// Errors raised while capturing or ingesting audio
#[derive(Error, Debug, Clone)]
pub enum CaptureError {
    /// Microphone unavailable, access denied, or device setup failed
    #[error("Audio device error: {0}")]
    Device(String),

    /// Input stream could not be built or started
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// Operation requires an active capture but none is running
    #[error("No capture in progress")]
    NotRecording,

    /// WAV finalization failed
    #[error("Audio encoding error: {0}")]
    Encoding(String),

    /// Selected audio file could not be read or is not usable
    #[error("Audio file error: {0}")]
    InvalidFile(String),
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        CaptureError::InvalidFile(e.to_string())
    }
}

impl From<hound::Error> for CaptureError {
    fn from(e: hound::Error) -> Self {
        CaptureError::Encoding(e.to_string())
    }
}

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;
