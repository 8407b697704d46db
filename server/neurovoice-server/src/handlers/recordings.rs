use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use voice_analysis_service::{
    new_recording_id, Gender, PatientInfo, RecordingMetadata, RecordingStatus, VoiceRecording,
    DEFAULT_USER_ID,
};

use crate::error::ApiError;
use crate::server::NeuroVoiceServer;

// ============================================================================
// REQUEST/RESPONSE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListRecordingsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub recording: VoiceRecording,
}

/// Assumed stored-audio format when estimating duration from byte size:
/// 16 kHz, 16-bit mono.
const BYTES_PER_SECOND: u64 = 16_000 * 2;

// ============================================================================
// HANDLERS
// ============================================================================

/// `GET /api/recordings?userId=` - all recordings for one user, newest
/// first. An absent store file is an empty list, not an error.
pub async fn list_recordings(
    State(server): State<NeuroVoiceServer>,
    Query(query): Query<ListRecordingsQuery>,
) -> Result<Json<Vec<VoiceRecording>>, ApiError> {
    let user_id = query.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let recordings = server
        .store
        .load()
        .await
        .map_err(|e| ApiError::storage("Failed to fetch recordings", e))?;

    let matching: Vec<VoiceRecording> = recordings
        .into_iter()
        .filter(|r| r.user_id == user_id)
        .collect();
    Ok(Json(matching))
}

/// `GET /api/recordings/:id`
pub async fn get_recording(
    State(server): State<NeuroVoiceServer>,
    Path(id): Path<String>,
) -> Result<Json<VoiceRecording>, ApiError> {
    let recording = server
        .store
        .find(&id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch recording", e))?
        .ok_or_else(|| ApiError::not_found("Recording not found"))?;
    Ok(Json(recording))
}

/// `DELETE /api/recordings/:id` - removes the JSON entry and makes a
/// best-effort attempt at deleting the stored audio file.
pub async fn delete_recording(
    State(server): State<NeuroVoiceServer>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = server
        .store
        .remove(&id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete recording", e))?
        .ok_or_else(|| ApiError::not_found("Recording not found"))?;

    if let Some(file_url) = &removed.file_url {
        server.store.delete_audio(file_url).await;
    }

    info!(recording_id = %id, "Recording deleted");
    Ok(Json(DeleteResponse {
        message: "Recording deleted successfully".to_string(),
    }))
}

/// `POST /api/recordings/upload` - multipart `audio` part plus patient
/// fields. Writes the blob under a timestamp-prefixed name, estimates
/// duration from byte size, prepends the record and rewrites the store.
pub async fn upload_recording(
    State(server): State<NeuroVoiceServer>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut audio: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "audio" {
            let file_name = field.file_name().unwrap_or("recording.webm").to_string();
            let content_type = field.content_type().map(ToString::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?;
            audio = Some((file_name, content_type, data.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?;
            fields.insert(name, value);
        }
    }

    let Some((original_name, content_type, data)) = audio else {
        return Err(ApiError::validation("No audio file provided"));
    };

    let sanitized = sanitize_file_name(&original_name);
    let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), sanitized);
    let file_url = server
        .store
        .write_audio(&stored_name, &data)
        .await
        .map_err(|e| ApiError::storage("Failed to upload recording", e))?;

    let patient_info = PatientInfo {
        full_name: fields.get("fullName").cloned().unwrap_or_default(),
        age: fields.get("age").and_then(|v| v.parse().ok()).unwrap_or(0),
        gender: match fields.get("gender").map(String::as_str) {
            Some("female") => Gender::Female,
            _ => Gender::Male,
        },
        test_time: fields
            .get("testTime")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.0),
    };

    let recording = VoiceRecording {
        id: new_recording_id(),
        user_id: fields
            .get("userId")
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        file_name: sanitized,
        file_url: Some(file_url),
        file_size: data.len() as u64,
        mime_type: content_type,
        duration: estimate_duration_secs(data.len() as u64) as f64,
        created_at: Utc::now(),
        status: RecordingStatus::Completed,
        result: None,
        metadata: Some(RecordingMetadata { patient_info }),
    };

    server
        .store
        .prepend(recording.clone())
        .await
        .map_err(|e| ApiError::storage("Failed to upload recording", e))?;

    info!(
        recording_id = %recording.id,
        file = %recording.file_name,
        size = recording.file_size,
        "Recording uploaded"
    );
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            recording,
        }),
    ))
}

/// Duration estimate from byte size at the assumed format; sub-second
/// blobs fall back to the 30-second default.
fn estimate_duration_secs(byte_len: u64) -> u64 {
    let estimate = byte_len / BYTES_PER_SECOND;
    if estimate == 0 {
        30
    } else {
        estimate
    }
}

/// Keep alphanumerics, dots and dashes; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
