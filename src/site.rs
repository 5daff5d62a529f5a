use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, span, Instrument, Level};

pub mod error;
pub mod routes;
pub mod state;
pub mod templates;
pub mod views;

use crate::{adapters::ObjectAdapter, config::SiteConfig, util::object::Provider};
use error::StartupError;
use routes::{archive_handler, home_handler, preview_handler, refresh_handler, search_handler};
use state::State;

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/archive", get(archive_handler))
        .route("/search", get(search_handler))
        .route("/preview/{name}", get(preview_handler))
        .route("/refresh", post(refresh_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn build_client(config: &SiteConfig) -> Result<Arc<dyn ObjectAdapter>, StartupError> {
    match config.provider {
        Provider::GCS => {
            let client_config = google_cloud_storage::client::ClientConfig::default()
                .with_auth()
                .await
                .map_err(|err| StartupError::Auth(err.to_string()))?;

            Ok(Arc::new(google_cloud_storage::client::Client::new(client_config)))
        }
        Provider::AWS => {
            let sdk_config = aws_config::load_from_env().await;
            Ok(Arc::new(aws_sdk_s3::Client::new(&sdk_config)))
        }
    }
}

pub async fn start_server(config: SiteConfig) -> Result<(), StartupError> {
    let span = span!(Level::INFO, "serve", context = "serve");

    async {
        info!(bucket = %config.bucket, provider = ?config.provider, "called");

        let client = build_client(&config).await?;
        let state = State::new(client, &config)?;
        let app = router(state);

        let address = format!("0.0.0.0:{}", config.port);
        let listener = TcpListener::bind(&address).await?;
        info!("Server running on {address}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shut down");
        Ok::<(), StartupError>(())
    }
    .instrument(span)
    .await
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
            Ok(mut stream) => {
                stream.recv().await;
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
