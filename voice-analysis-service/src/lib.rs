//! Voice analysis service for NeuroVoice Engine
//!
//! Submits voice samples with patient details to the external UPDRS
//! scoring endpoint and maps responses into prediction results, with the
//! canonical severity banding and the recordings-history client alongside.
//!
//! # Example
//!
//! ```rust,no_run
//! use voice_analysis_service::{AnalysisClient, AudioPayload, Gender, PatientInfo};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnalysisClient::from_env();
//! let patient = PatientInfo {
//!     full_name: "Jane Doe".into(),
//!     age: 63,
//!     gender: Gender::Female,
//!     test_time: 1.5,
//! };
//! let audio = AudioPayload {
//!     file_name: Some("voice.wav".into()),
//!     mime_type: "audio/wav".into(),
//!     data: std::fs::read("voice.wav")?,
//! };
//!
//! let recording = client.upload_recording(&patient, audio).await?;
//! if let Some(result) = &recording.result {
//!     println!("UPDRS {} -> {:?}", result.score, result.risk_level);
//! }
//! # Ok(())
//! # }
//! ```

pub mod banding;
pub mod client;
pub mod error;
pub mod history;
pub mod models;
pub mod validation;

pub use banding::{recommendations_for_score, Severity, SeverityInfo};
pub use client::{AnalysisClient, AudioPayload, DEFAULT_ANALYZE_API_URL};
pub use error::{AnalysisError, AnalysisResult};
pub use history::{RecordingsApi, DEFAULT_RECORDINGS_API_URL};
pub use models::{
    new_recording_id, new_result_id, Gender, PatientInfo, PredictionResult, RecordingMetadata,
    RecordingStatus, RiskLevel, VoiceFeatures, VoiceRecording, DEFAULT_USER_ID,
};
pub use validation::{FieldError, AGE_MAX, AGE_MIN, NAME_MAX_LEN};
