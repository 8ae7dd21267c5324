//! HTTP Server
//!
//! Axum router exposing the element catalog, per-kind property schemas,
//! a preview/export surface, and the per-session builder WebSocket.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use maquette_canvas::element::ElementKind;
use maquette_canvas::properties::{self, Field};
use maquette_canvas::{catalog, SessionManager};
use maquette_codegen::{GeneratedCode, PreviewRenderer, RenderedElement};
use maquette_llm::GenerativeBackend;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::ws;

/// Interval between expired-session sweeps
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Shared state for all handlers
pub struct AppState {
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Generative backend, when a credential is configured
    pub backend: Option<Arc<dyn GenerativeBackend>>,
}

impl AppState {
    /// Create the shared state
    #[must_use]
    pub fn new(sessions: Arc<SessionManager>, backend: Option<Arc<dyn GenerativeBackend>>) -> Self {
        Self { sessions, backend }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/v1/catalog", get(get_catalog))
        .route("/api/v1/properties/:kind", get(get_property_schema))
        .route("/api/v1/sessions/:session_id/preview", get(preview_session))
        .route("/api/v1/sessions/:session_id/export", get(export_session))
        .route("/api/v1/canvas/ws/:session_id", get(ws::canvas_ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the server until shutdown
pub async fn run(settings: Settings, state: Arc<AppState>) -> Result<()> {
    let sweeper_sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sweeper_sessions.cleanup_expired().await;
            if removed > 0 {
                debug!(removed, "expired sessions cleaned up");
            }
        }
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "maquette server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_catalog() -> impl IntoResponse {
    Json(catalog::all())
}

/// The editable fields for one element kind
#[derive(Debug, Serialize)]
struct PropertySchema {
    kind: ElementKind,
    props: &'static [Field],
    style: &'static [Field],
}

async fn get_property_schema(
    Path(kind): Path<String>,
) -> Result<Json<PropertySchema>, StatusCode> {
    let kind = catalog::all()
        .iter()
        .map(|entry| entry.kind)
        .find(|k| k.as_str() == kind)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(PropertySchema {
        kind,
        props: properties::prop_fields(kind),
        style: properties::style_fields(),
    }))
}

/// Paint-ordered preview of a session's canvas.
async fn preview_session(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RenderedElement>>, StatusCode> {
    let session = state
        .sessions
        .get_session(session_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    let ordered = session.canvas.render_order();
    Ok(Json(PreviewRenderer::new().render_all(&ordered)))
}

/// Local-template export of a session's canvas.
async fn export_session(
    Path(session_id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<GeneratedCode>, StatusCode> {
    let session = state
        .sessions
        .get_session(session_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    let ordered = session.canvas.render_order();
    Ok(Json(maquette_codegen::export(&ordered)))
}
