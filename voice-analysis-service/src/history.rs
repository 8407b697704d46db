//! Client for the local recordings API
//!
//! The flat-file recordings service is the fallback lookup for the
//! results view (keyed by recording id) and feeds the history list.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::VoiceRecording;
use reqwest::StatusCode;
use tracing::debug;

/// Default base URL of the recordings API.
pub const DEFAULT_RECORDINGS_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct RecordingsApi {
    http: reqwest::Client,
    base_url: String,
}

impl RecordingsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL from `RECORDINGS_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var("RECORDINGS_API_URL")
            .unwrap_or_else(|_| DEFAULT_RECORDINGS_API_URL.into());
        Self::new(base_url)
    }

    /// All stored recordings belonging to `user_id`.
    pub async fn list_recordings(&self, user_id: &str) -> AnalysisResult<Vec<VoiceRecording>> {
        let url = format!("{}/api/recordings?userId={}", self.base_url, user_id);
        debug!(url = %url, "Fetching recordings");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AnalysisError::Transport(format!(
                "Failed to fetch recordings: {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    /// One recording by id.
    pub async fn get_recording(&self, id: &str) -> AnalysisResult<VoiceRecording> {
        let url = format!("{}/api/recordings/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(AnalysisError::NotFound(id.to_string())),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(AnalysisError::Transport(format!(
                "Failed to fetch recording: {}",
                status
            ))),
        }
    }

    /// Delete a recording and its stored audio.
    pub async fn delete_recording(&self, id: &str) -> AnalysisResult<()> {
        let url = format!("{}/api/recordings/{}", self.base_url, id);
        let response = self.http.delete(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(AnalysisError::NotFound(id.to_string())),
            status if status.is_success() => Ok(()),
            status => Err(AnalysisError::Transport(format!(
                "Failed to delete recording: {}",
                status
            ))),
        }
    }
}
