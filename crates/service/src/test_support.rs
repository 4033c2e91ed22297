#![cfg(test)]
use configs::DatabaseConfig;
use models::FeatureId;

use crate::feature::repo::MongoFeatureRepository;

/// Mongo-backed repository on a fresh collection, or `None` when no test
/// server is configured (`MONGO_TEST_URL` unset) or `SKIP_DB_TESTS` is set.
pub async fn get_repo() -> Result<Option<MongoFeatureRepository>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let Ok(url) = std::env::var("MONGO_TEST_URL") else {
        eprintln!("MONGO_TEST_URL missing; skip mongo repository tests");
        return Ok(None);
    };
    let cfg = DatabaseConfig {
        url,
        name: "feature_store_test".into(),
        connect_timeout_secs: 5,
        ..DatabaseConfig::default()
    };
    let db = models::db::connect(&cfg).await?;
    // one collection per test keeps parallel tests apart
    let collection = format!("features_{}", FeatureId::new());
    Ok(Some(MongoFeatureRepository::new(db, &collection)))
}
