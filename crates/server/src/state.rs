use std::sync::Arc;
use std::time::Duration;

use service::feature::{FeatureRepository, FeatureService};

/// Shared by every handler; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub features: Arc<FeatureService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn FeatureRepository>, op_timeout: Option<Duration>) -> Self {
        Self { features: Arc::new(FeatureService::new(repo, op_timeout)) }
    }
}
