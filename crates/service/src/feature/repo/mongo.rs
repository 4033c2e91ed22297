use async_trait::async_trait;
use configs::DatabaseConfig;
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use models::{db, FeatureDocument, FeatureId};
use tracing::warn;

use crate::errors::ServiceError;
use crate::feature::domain::ReplaceOutcome;
use crate::feature::repository::FeatureRepository;
use crate::pagination::Pagination;

/// MongoDB-backed repository over a single collection.
#[derive(Clone)]
pub struct MongoFeatureRepository {
    db: Database,
    coll: Collection<FeatureDocument>,
}

impl MongoFeatureRepository {
    pub fn new(db: Database, collection: &str) -> Self {
        let coll = db.collection::<FeatureDocument>(collection);
        Self { db, coll }
    }

    pub fn from_config(db: Database, cfg: &DatabaseConfig) -> Self {
        let coll = db::features_collection(&db, cfg);
        Self { db, coll }
    }

    pub fn collection_name(&self) -> &str {
        self.coll.name()
    }
}

fn find_options(page: Option<Pagination>) -> FindOptions {
    let mut opts = FindOptions::default();
    if let Some(p) = page {
        let (_, per_page) = p.normalize();
        opts.sort = Some(doc! { "_id": 1 });
        opts.skip = Some(p.offset());
        opts.limit = Some(per_page as i64);
    }
    opts
}

#[async_trait]
impl FeatureRepository for MongoFeatureRepository {
    async fn ping(&self) -> Result<(), ServiceError> {
        db::ping(&self.db).await?;
        Ok(())
    }

    async fn list(&self, page: Option<Pagination>) -> Result<Vec<FeatureDocument>, ServiceError> {
        // raw documents: other writers share this collection
        let raw = self.coll.clone_with_type::<Document>();
        let mut cursor = raw.find(None, find_options(page)).await?;
        let mut out = Vec::new();
        while cursor.advance().await? {
            let stored: Document = cursor.deserialize_current()?;
            match FeatureDocument::from_stored(stored) {
                Ok(feature) => out.push(feature),
                Err(e) => warn!(collection = %self.coll.name(), error = %e, "skipping unreadable stored feature"),
            }
        }
        Ok(out)
    }

    async fn insert(&self, doc: FeatureDocument) -> Result<FeatureId, ServiceError> {
        let res = self.coll.insert_one(&doc, None).await?;
        res.inserted_id
            .as_object_id()
            .map(FeatureId::from)
            .ok_or_else(|| ServiceError::Db(format!("store returned a non-ObjectId id: {}", res.inserted_id)))
    }

    async fn replace(&self, id: FeatureId, doc: FeatureDocument) -> Result<ReplaceOutcome, ServiceError> {
        let res = self
            .coll
            .replace_one(doc! { "_id": id.object_id() }, &doc, None)
            .await?;
        Ok(ReplaceOutcome { matched: res.matched_count, modified: res.modified_count })
    }

    async fn delete(&self, id: FeatureId) -> Result<u64, ServiceError> {
        let res = self.coll.delete_one(doc! { "_id": id.object_id() }, None).await?;
        Ok(res.deleted_count)
    }
}
