//! Axum web server for the gallery.
//!
//! Serves the embedded front-end shell and the JSON API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{list_platforms, list_records, list_statuses, AppState};
use crate::config::Settings;
use crate::notion::NotionClient;

/// Embedded front-end files.
#[derive(RustEmbed)]
#[folder = "ui"]
struct Assets;

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/data", get(list_records))
        .route("/api/platforms", get(list_platforms))
        .route("/api/statuses", get(list_statuses))
        .fallback(static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C or SIGTERM.
///
/// Fails before binding if the settings are invalid.
pub async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    settings.validate()?;

    let client = NotionClient::new(&settings.notion)?;
    let database_id = settings.notion.database_id().map(str::to_string);
    if database_id.is_none() {
        tracing::warn!("NOTION_DATABASE_ID not configured; API requests will fail");
    }
    if settings.notion.token.is_empty() {
        tracing::warn!("NOTION_INTEGRATION_SECRET not configured; Notion calls will fail");
    }

    let state = Arc::new(AppState::new(database_id, Arc::new(client)));
    let app = router(state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Gallery running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ============================================================================
// Static File Handler
// ============================================================================

/// Serve the page at `/` and its assets; anything else is a 404.
async fn static_handler(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let content_type = HeaderValue::from_str(mime.as_ref())
                .unwrap_or(HeaderValue::from_static("application/octet-stream"));
            (
                [(header::CONTENT_TYPE, content_type)],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
