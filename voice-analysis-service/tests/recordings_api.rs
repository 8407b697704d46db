//! Tests for the recordings-history client against an in-process
//! stand-in for the flat-file API.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use voice_analysis_service::{AnalysisError, RecordingsApi};

fn stored_recording(id: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "userId": user_id,
        "fileName": "voice.wav",
        "fileUrl": format!("/uploads/recordings/{}-voice.wav", id),
        "fileSize": 64000,
        "mimeType": "audio/wav",
        "duration": 10.0,
        "createdAt": "2026-08-07T10:00:00Z",
        "status": "completed"
    })
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn list_passes_user_id_and_decodes_records() {
    let router = Router::new().route(
        "/api/recordings",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("userId").map(String::as_str), Some("default-user"));
            Json(serde_json::json!([
                stored_recording("rec_1", "default-user"),
                stored_recording("rec_2", "default-user"),
            ]))
        }),
    );
    let base = spawn_server(router).await;

    let recordings = RecordingsApi::new(base)
        .list_recordings("default-user")
        .await
        .unwrap();
    assert_eq!(recordings.len(), 2);
    assert_eq!(recordings[0].id, "rec_1");
    assert_eq!(recordings[0].file_url.as_deref(), Some("/uploads/recordings/rec_1-voice.wav"));
}

#[tokio::test]
async fn get_decodes_single_recording() {
    let router = Router::new().route(
        "/api/recordings/:id",
        get(|Path(id): Path<String>| async move { Json(stored_recording(&id, "default-user")) }),
    );
    let base = spawn_server(router).await;

    let recording = RecordingsApi::new(base).get_recording("rec_42").await.unwrap();
    assert_eq!(recording.id, "rec_42");
    assert_eq!(recording.duration, 10.0);
}

#[tokio::test]
async fn missing_recording_maps_to_not_found() {
    let router = Router::new().route(
        "/api/recordings/:id",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Recording not found" })),
            )
        })
        .delete(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Recording not found" })),
            )
        }),
    );
    let base = spawn_server(router).await;
    let api = RecordingsApi::new(base);

    assert!(matches!(
        api.get_recording("rec_missing").await.unwrap_err(),
        AnalysisError::NotFound(_)
    ));
    assert!(matches!(
        api.delete_recording("rec_missing").await.unwrap_err(),
        AnalysisError::NotFound(_)
    ));
}

#[tokio::test]
async fn delete_succeeds_on_message_response() {
    let router = Router::new().route(
        "/api/recordings/:id",
        get(|| async { StatusCode::OK }).delete(|| async {
            Json(serde_json::json!({ "message": "Recording deleted successfully" }))
        }),
    );
    let base = spawn_server(router).await;

    RecordingsApi::new(base).delete_recording("rec_1").await.unwrap();
}
