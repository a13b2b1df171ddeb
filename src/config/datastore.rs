//! Datastore target defaulting and validation.

use super::model::{Config, DatastoreConfig, GithubDatastoreConfig};
use super::types::{DEFAULT_BRANCH, DEFAULT_REPORTS_DIR};
use crate::error::{ConfigError, Result};

impl DatastoreConfig {
    /// Fill GitHub target defaults and validate the result.
    ///
    /// `repository` is the root `repository` of the config, used to derive
    /// the default report path. Returns a normalized copy; applying it again
    /// to its own output yields the same value.
    ///
    /// Checks, in order:
    /// - `github` must be set
    /// - `branch` defaults to `main`
    /// - `path` defaults to `reports/<repository>/report.json` when `repository` is known
    /// - `github.repository` must be set and be `owner/repo`
    /// - `branch` and `path` must be set
    pub fn build_github(&self, repository: &str) -> Result<DatastoreConfig> {
        let Some(github) = &self.github else {
            return Err(ConfigError::Datastore(
                "datastore.github not set".to_string(),
            ));
        };

        let mut github = github.clone();
        if github.branch.is_empty() {
            github.branch = DEFAULT_BRANCH.to_string();
        }
        if github.path.is_empty() && !repository.is_empty() {
            github.path = format!("{}/{}/report.json", DEFAULT_REPORTS_DIR, repository);
        }

        validate_github(&github)?;

        Ok(DatastoreConfig {
            condition: self.condition.clone(),
            github: Some(github),
        })
    }
}

fn validate_github(github: &GithubDatastoreConfig) -> Result<()> {
    if github.repository.is_empty() {
        return Err(ConfigError::Datastore(
            "datastore.github.repository not set".to_string(),
        ));
    }
    if github.repository.matches('/').count() != 1 {
        return Err(ConfigError::Datastore(
            "datastore.github.repository should be 'owner/repo'".to_string(),
        ));
    }
    if github.branch.is_empty() {
        return Err(ConfigError::Datastore(
            "datastore.github.branch not set".to_string(),
        ));
    }
    if github.path.is_empty() {
        return Err(ConfigError::Datastore(
            "datastore.github.path not set".to_string(),
        ));
    }
    Ok(())
}

impl Config {
    /// Build the datastore target of this config.
    ///
    /// Call after [`Config::build`] so that `repository` is resolved.
    pub fn build_datastore(&self) -> Result<DatastoreConfig> {
        let Some(datastore) = &self.datastore else {
            return Err(ConfigError::Datastore("datastore not set".to_string()));
        };
        datastore.build_github(&self.repository)
    }
}
