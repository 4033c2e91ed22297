//! Feature CRUD: domain types, the storage seam and the service on top.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{Created, Feature, FeatureInput, ReplaceOutcome};
pub use repository::FeatureRepository;
pub use service::FeatureService;
