use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use tracing::info;

use crate::errors::ModelError;
use crate::feature::FeatureDocument;

const DEFAULT_APP_NAME: &str = "feature-store";

/// Build a client from `cfg`, select the database and verify it answers a ping.
///
/// The driver connects lazily, so the ping is what actually proves the
/// server is reachable; it is bounded by `connect_timeout_secs`.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Database, ModelError> {
    let mut opts = ClientOptions::parse(&cfg.url)
        .await
        .map_err(|e| ModelError::Connect(e.to_string()))?;
    opts.connect_timeout = Some(cfg.connect_timeout());
    opts.server_selection_timeout = Some(cfg.connect_timeout());
    if let Some(name) = &cfg.app_name {
        opts.app_name = Some(name.clone());
    } else if opts.app_name.is_none() {
        opts.app_name = Some(DEFAULT_APP_NAME.to_string());
    }

    let client = Client::with_options(opts).map_err(|e| ModelError::Connect(e.to_string()))?;
    let db = client.database(&cfg.name);
    ping(&db).await?;
    info!(database = %cfg.name, url = %cfg.redacted_url(), "connected to mongo");
    Ok(db)
}

/// Liveness round trip.
pub async fn ping(db: &Database) -> Result<(), ModelError> {
    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| ModelError::Ping(e.to_string()))?;
    Ok(())
}

pub fn features_collection(db: &Database, cfg: &DatabaseConfig) -> Collection<FeatureDocument> {
    db.collection::<FeatureDocument>(&cfg.collection)
}
