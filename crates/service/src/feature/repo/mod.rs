//! Concrete `FeatureRepository` backends.

pub mod mongo;

pub use mongo::MongoFeatureRepository;
