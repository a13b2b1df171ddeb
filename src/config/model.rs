//! Config tree definition.

use super::types::{null_as_default, string_or_number};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
///
/// This struct represents the contents of `.octocov.yml`. Unknown fields in
/// the document are ignored. The working directory and the resolved config
/// file path are fixed at construction/load time and never serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository in `owner/repo` form; falls back to `GITHUB_REPOSITORY` on build.
    pub repository: String,

    /// Coverage settings. Always present, even when the document sets it to null.
    #[serde(deserialize_with = "null_as_default")]
    pub coverage: CoverageConfig,

    /// Code-to-test ratio settings.
    #[serde(rename = "codeToTestRatio", skip_serializing_if = "Option::is_none")]
    pub code_to_test_ratio: Option<CodeToTestRatioConfig>,

    /// Where to persist the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datastore: Option<DatastoreConfig>,

    /// Central repository mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub central: Option<CentralConfig>,

    #[serde(skip)]
    pub(super) wd: PathBuf,

    /// Absolute path of the loaded config file; `None` when nothing was loaded.
    #[serde(skip)]
    pub(super) path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Directory or file the coverage report is read from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,

    pub badge: BadgeConfig,

    /// Minimum acceptable coverage, e.g. `"75%"` or `60`.
    #[serde(
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub acceptable: Option<String>,
}

/// Output location of a badge artifact. An empty path disables the badge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeToTestRatioConfig {
    /// Glob patterns selecting code files.
    #[serde(deserialize_with = "null_as_default")]
    pub code: Vec<String>,

    /// Glob patterns selecting test files.
    #[serde(deserialize_with = "null_as_default")]
    pub test: Vec<String>,

    pub badge: BadgeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatastoreConfig {
    /// Gating expression; `None` means always store.
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubDatastoreConfig>,
}

/// A report stored as a file committed to a GitHub repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubDatastoreConfig {
    pub repository: String,
    pub branch: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralConfig {
    pub enable: bool,
    pub reports: String,
    pub badges: String,
    pub root: String,
}
