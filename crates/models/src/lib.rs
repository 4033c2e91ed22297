//! Storage-facing model of a GeoJSON Feature plus the MongoDB connection
//! helpers shared by the service and server crates.

pub mod errors;
pub mod db;
pub mod feature;

pub use feature::{FeatureDocument, FeatureId, FEATURE_TYPE};
