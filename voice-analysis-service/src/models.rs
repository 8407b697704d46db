//! Domain models for voice recordings and prediction results.
//!
//! Wire names are camelCase to stay compatible with the recordings store
//! and API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder account used while authentication stays mocked.
pub const DEFAULT_USER_ID: &str = "default-user";

/// Patient details collected before a voice sample is submitted.
/// Immutable once a submission has been made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    /// Time since the last test, in days
    pub test_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted voice sample and, once scored, its analysis outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRecording {
    pub id: String,
    pub user_id: String,
    pub file_name: String,
    /// Relative URL of the stored audio. Externally scored recordings are
    /// never written to local storage and carry no URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Duration in seconds
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    pub status: RecordingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordingMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Uploading,
    Processing,
    Completed,
    Failed,
}

/// Extra fields persisted by the flat-file upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    pub patient_info: PatientInfo,
}

/// Outcome of one scored submission. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub id: String,
    pub recording_id: String,
    /// UPDRS score on the 0-108 scale
    pub score: f64,
    /// Confidence placeholder, 0-1
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub features: VoiceFeatures,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub updrs_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Acoustic feature placeholders. The remote model does not report
/// per-feature values, so these stay zeroed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceFeatures {
    pub jitter: f64,
    pub shimmer: f64,
    pub hnr: f64,
    pub pitch: f64,
    pub formants: Vec<f64>,
}

/// Synthesize a recording identifier: timestamp-prefixed so ids sort by
/// creation time, with a uuid-derived suffix for uniqueness.
pub fn new_recording_id() -> String {
    prefixed_id("rec")
}

/// Synthesize a prediction result identifier.
pub fn new_result_id() -> String {
    prefixed_id("res")
}

fn prefixed_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &suffix[..7])
}
