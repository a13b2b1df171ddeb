//! Configuration model for octocov-config.
//!
//! This module defines the Config tree that represents `.octocov.yml` /
//! `octocov.yml`, locates and loads it, expands environment references in
//! its string fields, and validates the optional datastore and central
//! sections on demand.

mod central;
mod datastore;
mod model;
mod operations;
mod ratio;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::{
    BadgeConfig, CentralConfig, CodeToTestRatioConfig, Config, CoverageConfig, DatastoreConfig,
    GithubDatastoreConfig,
};
pub use operations::resolve_config_path;
pub use ratio::{CodeTestMatcher, FileRole};
