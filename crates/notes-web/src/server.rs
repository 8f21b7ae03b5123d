use axum::http::HeaderValue;
use axum::Router;
use notes_config::{ApiConfig, ServerConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::routes::{folder_routes, health_routes, notes_routes, root_routes};
use crate::services::store::{init_store, AppState};
use crate::{Result, WebError};

/// The full application router over `state`
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origins)?;

    Ok(Router::new()
        .merge(root_routes())
        .merge(notes_routes())
        .merge(folder_routes())
        .merge(health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Only the listed origins get CORS headers. Credentials are allowed, so
/// methods and headers are mirrored rather than wildcarded.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(WebError::Config(
                    "Wildcard CORS origin cannot be combined with credentials".to_string(),
                ));
            }
            origin
                .parse::<HeaderValue>()
                .map_err(|e| WebError::Config(format!("Invalid CORS origin '{origin}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub async fn start_server(config: &ApiConfig) -> Result<()> {
    info!("Connecting to note store...");
    let state = init_store(&config.database).await?;
    let app = build_router(state, &config.server)?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(WebError::Io)?;
    info!("Notes API listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WebError::Io)?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
