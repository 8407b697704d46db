//! Flat-file recording store
//!
//! All recordings live in a single JSON array that is read and rewritten
//! wholesale on every mutation. The read-modify-write is not locked or
//! atomic: concurrent writers can lose updates. That is an accepted
//! property of this placeholder store; the wire contract, not the
//! storage, is what downstream code depends on.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use voice_analysis_service::VoiceRecording;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct RecordingStore {
    data_file: PathBuf,
    uploads_dir: PathBuf,
}

impl RecordingStore {
    pub fn new(data_file: impl Into<PathBuf>, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Read the whole array. An absent store file is an empty store.
    pub async fn load(&self) -> StoreResult<Vec<VoiceRecording>> {
        match tokio::fs::read_to_string(&self.data_file).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the whole array.
    pub async fn save(&self, recordings: &[VoiceRecording]) -> StoreResult<()> {
        if let Some(parent) = self.data_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(recordings)?;
        tokio::fs::write(&self.data_file, contents).await?;
        debug!(count = recordings.len(), "Persisted recording store");
        Ok(())
    }

    /// Prepend a new recording so the newest entry lists first.
    pub async fn prepend(&self, recording: VoiceRecording) -> StoreResult<()> {
        let mut recordings = self.load().await?;
        recordings.insert(0, recording);
        self.save(&recordings).await
    }

    pub async fn find(&self, id: &str) -> StoreResult<Option<VoiceRecording>> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    /// Remove a recording entry, returning it for audio cleanup.
    pub async fn remove(&self, id: &str) -> StoreResult<Option<VoiceRecording>> {
        let mut recordings = self.load().await?;
        let position = recordings.iter().position(|r| r.id == id);
        match position {
            Some(index) => {
                let removed = recordings.remove(index);
                self.save(&recordings).await?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    /// Write an uploaded audio blob and return its relative URL.
    pub async fn write_audio(&self, stored_name: &str, data: &[u8]) -> StoreResult<String> {
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let path = self.uploads_dir.join(stored_name);
        tokio::fs::write(&path, data).await?;
        Ok(format!("/uploads/recordings/{}", stored_name))
    }

    /// Best-effort removal of the audio blob behind a stored URL. A
    /// missing file is not an error; the JSON entry is already gone.
    pub async fn delete_audio(&self, file_url: &str) {
        let file_name = match file_url.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => return,
        };
        let path = self.uploads_dir.join(file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Could not delete audio file");
            }
        }
    }
}
