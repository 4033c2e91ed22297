use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use models::FeatureId;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::feature::domain::{Feature, FeatureInput, ReplaceOutcome};
use crate::feature::repository::FeatureRepository;
use crate::pagination::Pagination;

/// Feature use cases, independent of the web framework.
///
/// Holds the only shared handle in the process (the repository) and applies
/// the write rules: `type` is always `"Feature"` and every storage call is
/// bounded by `op_timeout` when one is set. Identifiers arrive already parsed,
/// see [`FeatureService::parse_id`].
pub struct FeatureService {
    repo: Arc<dyn FeatureRepository>,
    op_timeout: Option<Duration>,
}

impl FeatureService {
    pub fn new(repo: Arc<dyn FeatureRepository>, op_timeout: Option<Duration>) -> Self {
        Self { repo, op_timeout }
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        let Some(after) = self.op_timeout else {
            return fut.await;
        };
        match tokio::time::timeout(after, fut).await {
            Ok(res) => res,
            Err(_) => {
                warn!(op, timeout_secs = after.as_secs_f64(), "storage call timed out");
                Err(ServiceError::Timeout { op, after })
            }
        }
    }

    /// Path identifiers must be 24 hex characters; anything else is a client error.
    pub fn parse_id(raw: &str) -> Result<FeatureId, ServiceError> {
        Ok(raw.parse::<FeatureId>()?)
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.bounded("ping", self.repo.ping()).await
    }

    /// Everything in the collection, or one page of it.
    #[instrument(skip(self))]
    pub async fn list(&self, page: Option<Pagination>) -> Result<Vec<Feature>, ServiceError> {
        let docs = self.bounded("list", self.repo.list(page)).await?;
        Ok(docs.into_iter().map(Feature::from).collect())
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: FeatureInput) -> Result<FeatureId, ServiceError> {
        let id = self.bounded("insert", self.repo.insert(input.into_document())).await?;
        info!(id = %id, "feature_created");
        Ok(id)
    }

    /// Full replacement. An unknown but well-formed id is not an error:
    /// the outcome simply reports zero matches.
    #[instrument(skip(self, input))]
    pub async fn replace(&self, id: FeatureId, input: FeatureInput) -> Result<ReplaceOutcome, ServiceError> {
        let out = self.bounded("replace", self.repo.replace(id, input.into_document())).await?;
        info!(id = %id, matched = out.matched, modified = out.modified, "feature_replaced");
        Ok(out)
    }

    /// Returns the number of removed documents; deleting twice is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: FeatureId) -> Result<u64, ServiceError> {
        let deleted = self.bounded("delete", self.repo.delete(id)).await?;
        info!(id = %id, deleted, "feature_deleted");
        Ok(deleted)
    }
}
