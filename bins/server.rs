use tracing::{error, info, warn};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT from it take effect
    let dotenv = dotenvy::dotenv();
    common::utils::logging::init_logging_from_env();
    info!(service = "feature_store", event = "logger_init", "tracing subscriber initialized");
    if let Err(e) = dotenv {
        warn!(service = "feature_store", event = "dotenv_missing", error = %e, "no .env file loaded, continuing");
    }
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "feature_store",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // configuration errors (e.g. no connection string) stop the process here
    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "feature_store", event = "config_invalid", error = %e, "cannot start");
            return std::process::ExitCode::FAILURE;
        }
    };

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "feature_store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "feature_store",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        database = %cfg.database.name,
        collection = %cfg.database.collection,
        "feature store starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "feature_store", event = "stop", %service_id, pid, "feature store stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "feature_store", event = "run_failed", %service_id, error = %e, "feature store terminated");
            std::process::ExitCode::FAILURE
        }
    }
}
