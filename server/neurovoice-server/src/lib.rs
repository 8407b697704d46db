//! NeuroVoice Server - recordings API over a flat-file store
//!
//! Serves the recording history endpoints (list, get, delete, upload)
//! backed by one JSON array file and a directory of uploaded audio
//! blobs. The store is a placeholder: reads and writes cover the whole
//! array and are not protected against concurrent writers.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use error::ApiError;
pub use server::{NeuroVoiceServer, ServerConfig};
pub use storage::RecordingStore;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware.
///
/// Uploaded audio blobs are served statically under
/// `/uploads/recordings/`, matching the relative URLs persisted in the
/// store.
pub fn create_app(server: NeuroVoiceServer) -> Router {
    let uploads = ServeDir::new(&server.config.uploads_dir);

    routes::create_routes()
        .nest_service("/uploads/recordings", uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        )
        .with_state(server)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
