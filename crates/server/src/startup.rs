use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::feature::repo::MongoFeatureRepository;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file, then environment, then validation. A missing connection
/// string ends up here as `InvalidConfig`.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Connect to the store, check it is alive, then serve until a shutdown signal.
/// Any failure before the listener is up is returned and is fatal for the process.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect(&cfg.database).await?;
    let repo = MongoFeatureRepository::from_config(db, &cfg.database);
    info!(
        database = %cfg.database.name,
        collection = %repo.collection_name(),
        op_timeout_secs = cfg.database.op_timeout_secs,
        "feature collection ready"
    );

    let state = ServerState::new(Arc::new(repo), cfg.database.op_timeout());
    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    serve(listener, state, shutdown_signal()).await
}

/// Serve the app on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    info!(addr = %local, "feature store listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
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
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}
