//! Config location, loading, building and readiness checks.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE_PATHS;
use crate::condition::{self, ConditionContext, GateDecision};
use crate::env::{EnvSnapshot, GITHUB_REPOSITORY};
use crate::error::{ConfigError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve which config file to load.
///
/// An explicit path is joined onto `wd`, so a relative path is taken from
/// the working directory and an absolute path replaces `wd`. Without one,
/// the candidate names are checked under `wd`; only regular files count.
///
/// # Returns
///
/// * `Ok(Some(path))` - Path of the config file, joined onto `wd`
/// * `Ok(None)` - No explicit path and no candidate exists
/// * `Err(ConfigError::DuplicateConfig)` - More than one candidate exists
pub fn resolve_config_path(wd: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(Some(wd.join(path)));
    }

    let mut found: Option<&str> = None;
    for candidate in DEFAULT_CONFIG_FILE_PATHS {
        let is_file = fs::metadata(wd.join(candidate))
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(first) = found {
            return Err(ConfigError::DuplicateConfig {
                first: first.to_string(),
                second: candidate.to_string(),
            });
        }
        found = Some(candidate);
    }

    Ok(found.map(|name| {
        debug!("found config file candidate '{}'", name);
        wd.join(name)
    }))
}

impl Config {
    /// Create an empty config rooted at the given working directory.
    pub fn new(wd: impl Into<PathBuf>) -> Self {
        Self {
            wd: wd.into(),
            ..Self::default()
        }
    }

    /// The working directory this config was created for.
    pub fn wd(&self) -> &Path {
        &self.wd
    }

    pub fn set_wd(&mut self, wd: impl Into<PathBuf>) {
        self.wd = wd.into();
    }

    /// Path of the loaded config file, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a config file was loaded.
    pub fn loaded(&self) -> bool {
        self.path.is_some()
    }

    /// Directory of the loaded config file, or the working directory.
    pub fn root(&self) -> PathBuf {
        match self.path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.to_path_buf(),
            None => self.wd.clone(),
        }
    }

    /// Parse a config document. The working directory and file path stay unset.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize the config tree back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Locate and load the config file into this config.
    ///
    /// When no file is found, `coverage.path` defaults to the working
    /// directory. When a file is loaded and the document does not set
    /// `coverage.path`, it defaults to the directory holding the file.
    /// Read and parse errors are returned unchanged.
    pub fn load(&mut self, explicit: Option<&Path>) -> Result<()> {
        let Some(path) = resolve_config_path(&self.wd, explicit)? else {
            debug!("no config file found in '{}'", self.wd.display());
            self.coverage.path = self.wd.to_string_lossy().into_owned();
            return Ok(());
        };

        debug!("loading config file '{}'", path.display());
        let content = fs::read_to_string(&path)?;
        let parsed = Self::from_yaml(&content)?;

        let wd = std::mem::take(&mut self.wd);
        *self = Self {
            wd,
            path: Some(path),
            ..parsed
        };

        if self.coverage.path.is_empty() {
            self.coverage.path = self.root().to_string_lossy().into_owned();
        }
        Ok(())
    }

    /// Expand environment references and fill structural defaults.
    ///
    /// Safe to call when optional sections are absent, and idempotent for
    /// values that do not themselves expand to `$` references. The gating
    /// expression in `datastore.if` is left untouched, and datastore fields
    /// are not validated here (see [`Config::build_datastore`]).
    pub fn build(&mut self, env: &EnvSnapshot) {
        env.expand_in_place(&mut self.repository);
        if self.repository.is_empty() {
            self.repository = env.get_or_empty(GITHUB_REPOSITORY).to_string();
            debug!(
                "repository defaulted from {} to '{}'",
                GITHUB_REPOSITORY, self.repository
            );
        }

        if let Some(github) = self.datastore.as_mut().and_then(|d| d.github.as_mut()) {
            env.expand_in_place(&mut github.repository);
            env.expand_in_place(&mut github.branch);
            env.expand_in_place(&mut github.path);
        }

        env.expand_in_place(&mut self.coverage.badge.path);

        // `codeToTestRatio.code`/`test` deserialize `null` as empty, so they
        // are already iterable here.

        if let Some(central) = self.central.as_mut() {
            env.expand_in_place(&mut central.root);
            env.expand_in_place(&mut central.reports);
            env.expand_in_place(&mut central.badges);
        }
    }

    /// Whether the code-to-test ratio can be computed (test patterns are set).
    pub fn code_to_test_ratio_ready(&self) -> bool {
        self.code_to_test_ratio
            .as_ref()
            .is_some_and(|r| !r.test.is_empty())
    }

    pub fn coverage_badge_ready(&self) -> bool {
        !self.coverage.badge.path.is_empty()
    }

    pub fn code_to_test_ratio_badge_ready(&self) -> bool {
        self.code_to_test_ratio_ready()
            && self
                .code_to_test_ratio
                .as_ref()
                .is_some_and(|r| !r.badge.path.is_empty())
    }

    /// Whether central mode is configured and enabled.
    pub fn central_ready(&self) -> bool {
        self.central.as_ref().is_some_and(|c| c.enable)
    }

    /// Evaluate `datastore.if` without printing anything.
    ///
    /// Returns `None` when there is no datastore section.
    pub fn datastore_gate(&self, ctx: &ConditionContext) -> Option<GateDecision> {
        let datastore = self.datastore.as_ref()?;
        Some(condition::gate(datastore.condition.as_deref(), ctx))
    }

    /// Whether the report should be stored.
    ///
    /// False when there is no datastore section or the `if` condition is not
    /// met. Skip and evaluation diagnostics are written to stderr.
    pub fn datastore_ready(&self, ctx: &ConditionContext) -> bool {
        let Some(decision) = self.datastore_gate(ctx) else {
            return false;
        };
        if let Some(diagnostic) = decision.diagnostic() {
            eprintln!("{}", diagnostic);
        }
        decision.is_satisfied()
    }
}
