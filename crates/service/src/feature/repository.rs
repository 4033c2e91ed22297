use async_trait::async_trait;
use models::{FeatureDocument, FeatureId};

use crate::errors::ServiceError;
use crate::feature::domain::ReplaceOutcome;
use crate::pagination::Pagination;

/// Storage seam for features. One method, one storage round trip.
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Liveness round trip to the backing store.
    async fn ping(&self) -> Result<(), ServiceError>;
    /// All documents when `page` is `None`, otherwise one page ordered by id.
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<FeatureDocument>, ServiceError>;
    async fn insert(&self, doc: FeatureDocument) -> Result<FeatureId, ServiceError>;
    /// Replace the whole document stored under `id`. Nothing is created when it is absent.
    async fn replace(&self, id: FeatureId, doc: FeatureDocument) -> Result<ReplaceOutcome, ServiceError>;
    /// Returns how many documents were removed (0 or 1).
    async fn delete(&self, id: FeatureId) -> Result<u64, ServiceError>;
}

/// In-memory repository for tests and local runs without a database.
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockFeatureRepository {
        docs: Mutex<Vec<FeatureDocument>>, // insertion order == id order
        failure: Mutex<Option<String>>,
    }

    impl MockFeatureRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every following call fail with `message` until [`Self::recover`].
        pub fn fail_with(&self, message: impl Into<String>) {
            *lock(&self.failure) = Some(message.into());
        }

        pub fn recover(&self) {
            *lock(&self.failure) = None;
        }

        pub fn len(&self) -> usize {
            lock(&self.docs).len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn get(&self, id: FeatureId) -> Option<FeatureDocument> {
            let oid = id.object_id();
            lock(&self.docs).iter().find(|d| d.id == Some(oid)).cloned()
        }

        fn check(&self) -> Result<(), ServiceError> {
            match lock(&self.failure).as_ref() {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(()),
            }
        }
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[async_trait]
    impl FeatureRepository for MockFeatureRepository {
        async fn ping(&self) -> Result<(), ServiceError> {
            self.check()
        }

        async fn list(&self, page: Option<Pagination>) -> Result<Vec<FeatureDocument>, ServiceError> {
            self.check()?;
            let docs = lock(&self.docs);
            Ok(match page {
                None => docs.clone(),
                Some(p) => {
                    let (_, per_page) = p.normalize();
                    docs.iter()
                        .skip(p.offset() as usize)
                        .take(per_page as usize)
                        .cloned()
                        .collect()
                }
            })
        }

        async fn insert(&self, doc: FeatureDocument) -> Result<FeatureId, ServiceError> {
            self.check()?;
            let id = FeatureId::new();
            lock(&self.docs).push(doc.with_id(id));
            Ok(id)
        }

        async fn replace(&self, id: FeatureId, doc: FeatureDocument) -> Result<ReplaceOutcome, ServiceError> {
            self.check()?;
            let oid = id.object_id();
            let mut docs = lock(&self.docs);
            let Some(slot) = docs.iter_mut().find(|d| d.id == Some(oid)) else {
                return Ok(ReplaceOutcome::default());
            };
            let replacement = doc.with_id(id);
            let modified = u64::from(*slot != replacement);
            *slot = replacement;
            Ok(ReplaceOutcome { matched: 1, modified })
        }

        async fn delete(&self, id: FeatureId) -> Result<u64, ServiceError> {
            self.check()?;
            let oid = id.object_id();
            let mut docs = lock(&self.docs);
            let before = docs.len();
            docs.retain(|d| d.id != Some(oid));
            Ok((before - docs.len()) as u64)
        }
    }
}
