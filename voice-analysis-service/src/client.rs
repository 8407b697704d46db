//! Remote scoring client
//!
//! Packages patient info and one audio source into a multipart request
//! for the external analysis endpoint and maps the response into a
//! [`VoiceRecording`] carrying its [`PredictionResult`]. The call is
//! one-shot: no retry, no backoff, no cancellation; a failed submission
//! is simply retryable by the caller.

use crate::banding::recommendations_for_score;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{
    new_recording_id, new_result_id, PatientInfo, PredictionResult, RecordingStatus, RiskLevel,
    VoiceFeatures, VoiceRecording, DEFAULT_USER_ID,
};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Default base URL of the analysis API.
pub const DEFAULT_ANALYZE_API_URL: &str = "http://localhost:8000";

/// Fixed confidence reported for UPDRS analysis; the remote model does
/// not return one.
const DEFAULT_CONFIDENCE: f64 = 0.85;

/// The audio half of a submission, already reduced to bytes.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    /// Original file name; a `recording-<millis>.wav` name is synthesized
    /// for captured audio
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Expected success body of `POST /analyze/voice`.
#[derive(Debug, Deserialize)]
struct AnalyzeVoiceResponse {
    prediction: Option<f64>,
    patient: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

/// Client for the external voice analysis endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL from `ANALYZE_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ANALYZE_API_URL").unwrap_or_else(|_| DEFAULT_ANALYZE_API_URL.into());
        Self::new(base_url)
    }

    /// Upload one voice sample for scoring.
    ///
    /// Patient info is re-validated here before any network traffic;
    /// invalid input fails fast with [`AnalysisError::Validation`]. The
    /// returned recording is complete in memory only: externally scored
    /// audio is never written to local storage and gets no `file_url`.
    pub async fn upload_recording(
        &self,
        patient: &PatientInfo,
        audio: AudioPayload,
    ) -> AnalysisResult<VoiceRecording> {
        patient
            .validate_message()
            .map_err(AnalysisError::Validation)?;

        let AudioPayload {
            file_name,
            mime_type,
            data,
        } = audio;

        if data.is_empty() {
            return Err(AnalysisError::Validation(
                "No audio file or recording provided".into(),
            ));
        }

        let file_name = file_name
            .unwrap_or_else(|| format!("recording-{}.wav", Utc::now().timestamp_millis()));
        let file_size = data.len() as u64;
        let name = patient.full_name.trim().to_string();

        let audio_part = Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str(&mime_type)?;
        let form = Form::new()
            .part("audio_file", audio_part)
            .text("name", name.clone())
            .text("age", patient.age.to_string())
            .text("sex", patient.gender.as_str())
            .text("test_time", patient.test_time.to_string());

        let endpoint = format!("{}/analyze/voice", self.base_url);
        debug!(
            endpoint = %endpoint,
            file = %file_name,
            size = file_size,
            "Submitting voice sample for analysis"
        );

        let response = self.http.post(&endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_body(&body)
                .unwrap_or_else(|| format!("API request failed with status {}", status.as_u16()));
            warn!(status = status.as_u16(), message = %message, "Voice analysis request failed");
            return Err(AnalysisError::Transport(message));
        }

        let body: AnalyzeVoiceResponse = response.json().await?;
        let score = body.prediction.ok_or_else(|| {
            AnalysisError::ResponseShape("missing prediction field".into())
        })?;
        let patient_name = body.patient.unwrap_or_else(|| name.clone());

        let recording_id = new_recording_id();
        let result = PredictionResult {
            id: new_result_id(),
            recording_id: recording_id.clone(),
            score,
            confidence: DEFAULT_CONFIDENCE,
            risk_level: RiskLevel::from_score(score),
            features: VoiceFeatures::default(),
            recommendations: recommendations_for_score(score),
            created_at: Utc::now(),
            patient_name: Some(patient_name),
            updrs_score: score,
        };

        info!(
            recording_id = %recording_id,
            score,
            risk_level = ?result.risk_level,
            "Voice analysis completed"
        );

        Ok(VoiceRecording {
            id: recording_id,
            user_id: DEFAULT_USER_ID.into(),
            file_name,
            file_url: None,
            file_size,
            mime_type: Some(mime_type),
            duration: patient.test_time,
            created_at: Utc::now(),
            status: RecordingStatus::Completed,
            result: Some(result),
            metadata: None,
        })
    }
}

/// Best-effort extraction of an error message from a non-2xx body:
/// structured `detail`/`message` first, raw text as the fallback.
fn parse_error_body(body: &str) -> Option<String> {
    match serde_json::from_str::<AnalyzeErrorBody>(body) {
        Ok(parsed) => parsed.detail.or(parsed.message),
        Err(_) => {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_detail_over_message() {
        let body = r#"{"detail": "Age must be between 11 and 119", "message": "other"}"#;
        assert_eq!(
            parse_error_body(body).as_deref(),
            Some("Age must be between 11 and 119")
        );
    }

    #[test]
    fn error_body_falls_back_to_message_then_raw_text() {
        assert_eq!(
            parse_error_body(r#"{"message": "upstream offline"}"#).as_deref(),
            Some("upstream offline")
        );
        assert_eq!(parse_error_body("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(parse_error_body(""), None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = AnalysisClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
