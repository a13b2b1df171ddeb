//! Code/test file classification for the code-to-test ratio.

use super::model::CodeToTestRatioConfig;
use crate::error::{ConfigError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Role of a file in the code-to-test ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Code,
    Test,
}

/// Compiled `code`/`test` patterns.
#[derive(Debug, Clone)]
pub struct CodeTestMatcher {
    code: GlobSet,
    test: GlobSet,
}

impl CodeTestMatcher {
    /// Classify a path relative to the repository root.
    ///
    /// A path matching both sets counts as test code.
    pub fn classify(&self, path: &str) -> Option<FileRole> {
        let path = path.replace('\\', "/");
        let path = path.trim_start_matches("./");
        if self.test.is_match(path) {
            Some(FileRole::Test)
        } else if self.code.is_match(path) {
            Some(FileRole::Code)
        } else {
            None
        }
    }
}

impl CodeToTestRatioConfig {
    /// Compile the code and test patterns.
    pub fn matcher(&self) -> Result<CodeTestMatcher> {
        Ok(CodeTestMatcher {
            code: compile(&self.code)?,
            test: compile(&self.test)?,
        })
    }
}

fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: patterns.join(", "),
        source: e,
    })
}
