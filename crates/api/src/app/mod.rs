//! HTTP API application wiring (Axum router + storage wiring).
//!
//! - `services.rs`: opens the configured product store
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and query-parameter handling
//! - `errors.rs`: consistent `{"error": ...}` responses

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::context::AppState;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)))
        .with_state(state)
}

/// Serve `app` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
