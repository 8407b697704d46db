use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{health, recordings};
use crate::server::NeuroVoiceServer;

pub mod paths {
    pub mod health {
        pub const HEALTH: &str = "/health";
    }

    pub mod recordings {
        pub const RECORDINGS: &str = "/api/recordings";
        pub const RECORDING_BY_ID: &str = "/api/recordings/:id";
        pub const UPLOAD: &str = "/api/recordings/upload";
    }
}

/// Create health check routes
pub fn health_routes() -> Router<NeuroVoiceServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Create recording store routes
pub fn recording_routes() -> Router<NeuroVoiceServer> {
    Router::new()
        .route(paths::recordings::RECORDINGS, get(recordings::list_recordings))
        .route(paths::recordings::UPLOAD, post(recordings::upload_recording))
        .route(paths::recordings::RECORDING_BY_ID, get(recordings::get_recording))
        .route(
            paths::recordings::RECORDING_BY_ID,
            delete(recordings::delete_recording),
        )
}

/// All routes of the recordings API
pub fn create_routes() -> Router<NeuroVoiceServer> {
    Router::new().merge(health_routes()).merge(recording_routes())
}
