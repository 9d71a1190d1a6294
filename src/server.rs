// ABOUTME: Server resource wiring and HTTP router assembly
// ABOUTME: Dependency-injected resources shared across handlers; no global mutable state

//! Server assembly
//!
//! [`ServerResources`] is the dependency-injection container handed to
//! every route: database, plan engine, and configuration, shared behind
//! an `Arc`. Nothing in the server reaches for process-wide state — the
//! resources a handler needs arrive through axum's `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::plans::PlanEngine;
use crate::routes::{health::HealthRoutes, plans::PlanRoutes};

/// Request timeout for the HTTP surface
///
/// Generous enough to cover the LLM call plus persistence; the LLM
/// timeout itself is tighter and configured separately.
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Shared, dependency-injected server resources
pub struct ServerResources {
    /// Persistence backend
    pub database: Database,
    /// Plan generation engine
    pub engine: PlanEngine,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle resources for injection into routes
    #[must_use]
    pub const fn new(database: Database, engine: PlanEngine, config: ServerConfig) -> Self {
        Self {
            database,
            engine,
            config,
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PlanRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            HTTP_REQUEST_TIMEOUT_SECS,
        )))
}

/// Run the HTTP server until shutdown
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    info!("HTTP server listening on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Resolve when the process receives a termination signal
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
