//! Test utilities for spendboard-core
//!
//! This module provides a mock spreadsheet server that serves a CSV export
//! the way a published sheet link does, for exercising `HttpSource`.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// CSV served by the mock server
pub const MOCK_SHEET_CSV: &str = "Completion_Date,Description,Amount
2024-01-05 10:00:00,Walmart grocery run,50
2024-01-20 19:45:00,Dominos pizza,20
2024-02-01 08:30:00,Walmart,30
";

/// Token accepted by the `/private.csv` route
pub const MOCK_SHEET_TOKEN: &str = "test-token";

/// Mock spreadsheet export server for testing
pub struct MockSheetServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockSheetServer {
    /// Start the mock server on an available port
    ///
    /// Routes:
    /// - `/sheet.csv`: the public export
    /// - `/private.csv`: the export, only with `Bearer test-token`
    /// - `/broken.csv`: always HTTP 500
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/sheet.csv", get(handle_sheet))
            .route("/private.csv", get(handle_private))
            .route("/broken.csv", get(handle_broken));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Full URL for a route on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockSheetServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_sheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/csv")], MOCK_SHEET_CSV)
}

async fn handle_private(headers: HeaderMap) -> axum::response::Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token == MOCK_SHEET_TOKEN)
        .unwrap_or(false);

    if authorized {
        handle_sheet().await.into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn handle_broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}
