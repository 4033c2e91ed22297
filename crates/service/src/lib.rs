//! Service layer for the feature store.
//! - `feature` holds the domain types, the repository seam and the service
//!   that enforces the write rules (type forcing, id parsing, call timeout).
//! - Storage backends live behind `FeatureRepository`, so handlers never
//!   touch the driver directly.

pub mod errors;
pub mod feature;
pub mod pagination;
#[cfg(test)]
pub mod test_support;
