use audio_capture::CaptureError;
use thiserror::Error;
use voice_analysis_service::{AnalysisError, FieldError};

/// Everything that can go wrong while driving the wizard. All variants
/// are recoverable at the UI boundary; none end the session.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Patient info does not pass the canonical checks; carries every
    /// failing field for inline display
    #[error("Please fill in all required fields correctly")]
    InvalidPatientInfo(Vec<FieldError>),

    /// Neither an uploaded file nor a recorded sample is attached
    #[error("Please upload or record audio first")]
    NoAudioSource,

    /// A file cannot be selected while the microphone is live
    #[error("Recording in progress; stop it before selecting a file")]
    RecordingInProgress,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl WizardError {
    /// Message suitable for a dismissible notification.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::InvalidPatientInfo(_) => {
                "Please complete patient information first".to_string()
            }
            WizardError::NoAudioSource => "Please upload or record audio first".to_string(),
            WizardError::RecordingInProgress => {
                "Stop the current recording before selecting a file".to_string()
            }
            WizardError::Capture(_) => "Could not access microphone".to_string(),
            WizardError::Analysis(e) => e.to_string(),
        }
    }
}

pub type WizardResult<T> = Result<T, WizardError>;
