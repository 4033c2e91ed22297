//! Shared building blocks for the feature store crates: log setup and the
//! small response payloads every HTTP surface returns.

pub mod types;
pub mod utils;
