//! Spendboard Web Server
//!
//! Axum-based dashboard for the enriched expenses table. The table is built
//! once before the listener binds and is only read afterwards.
//!
//! - Embedded single-page dashboard (`/`, `/dashboard.js`, `/dashboard.css`)
//! - JSON API under `/api`
//! - Security headers and request tracing via tower-http
//! - Sanitized error responses

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

use spendboard_core::Table;

mod handlers;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Extra files served for paths the router doesn't know
    pub static_dir: Option<PathBuf>,
}

/// Shared application state
pub struct AppState {
    pub table: Table,
    pub config: ServerConfig,
}

/// Create the application router
pub fn create_router(table: Table, config: ServerConfig) -> Router {
    let static_dir = config.static_dir.clone();
    let state = Arc::new(AppState { table, config });

    let api_routes = Router::new()
        // Tabs and chart views
        .route("/categories", get(handlers::list_categories))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/views/pie", get(handlers::get_pie))
        .route("/views/bar", get(handlers::get_bar))
        .route("/views/scatter", get(handlers::get_scatter))
        // Table
        .route("/transactions", get(handlers::list_transactions))
        .route("/summary", get(handlers::get_summary))
        .route("/health", get(handlers::health));

    // CSP: scripts and styles from our own assets; charts are inline SVG
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard.js", get(handlers::script))
        .route("/dashboard.css", get(handlers::stylesheet))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with default configuration
pub async fn serve(table: Table, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(table, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    table: Table,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let count = table.len();
    let app = create_router(table, config);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving {} transactions at http://{}", count, addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, "{}", self.message);

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests;
