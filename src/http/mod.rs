//! HTTP/JSON API for notes.
//!
//! Routes:
//! - `GET    /api/notes`         list all notes
//! - `POST   /api/notes`         create a note (201)
//! - `DELETE /api/notes`         delete all notes (204)
//! - `GET    /api/notes/count`   number of notes
//! - `GET    /api/notes/{id}`    fetch one note
//! - `PUT    /api/notes/{id}`    partial update
//! - `DELETE /api/notes/{id}`    delete one note (204)
//! - `GET    /health`            liveness probe

pub mod error;
pub mod notes;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::service::NoteService;

pub use error::ApiError;

/// Preflight cache lifetime advertised to browsers.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

pub(crate) struct AppState {
    pub(crate) service: NoteService,
}

/// Build the application router around `service`.
pub fn router(service: NoteService) -> Router {
    let state = Arc::new(AppState { service });
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(CORS_MAX_AGE);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/notes",
            get(notes::list).post(notes::create).delete(notes::delete_all),
        )
        .route("/api/notes/count", get(notes::count))
        .route(
            "/api/notes/{id}",
            get(notes::get).put(notes::update).delete(notes::delete),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Open the configured store and serve the API until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let store = config.storage.open()?;
    let app = router(NoteService::new(store));

    let listener = TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, storage = ?config.storage, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
