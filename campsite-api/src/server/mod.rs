// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::AppError;
pub use self::state::AppState;

/// Create the Axum application router with all routes and middleware.
///
/// Routes are mounted under `config.api_prefix`. The root route answers both
/// with and without a trailing slash.
pub fn create_app(state: AppState, config: &ApiConfig) -> Router {
    let api = Router::new()
        .route("/", get(handlers::root))
        .route("/camping", get(handlers::camping))
        .route("/fishing", get(handlers::fishing))
        .route("/contact", get(handlers::contact))
        .route("/rules", get(handlers::rules))
        .route("/gallery", get(handlers::gallery))
        .route("/gallery/:category", get(handlers::gallery_by_category))
        .route("/health", get(handlers::health_check));

    let prefix = config.api_prefix.as_str();
    let router = if prefix.is_empty() {
        api
    } else {
        Router::new()
            .route(&format!("{}/", prefix), get(handlers::root))
            .nest(prefix, api)
    };

    router
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server on the specified address until `shutdown` resolves.
pub async fn run_server<F>(app: Router, addr: SocketAddr, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::server(format!("Failed to bind {}: {}", addr, e)))?;
    serve(listener, app, shutdown).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are drained before returning.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::server(e.to_string()))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
