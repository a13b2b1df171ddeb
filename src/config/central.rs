//! Central repository mode: directory defaulting.

use super::model::{CentralConfig, Config};
use super::types::{DEFAULT_BADGES_DIR, DEFAULT_CENTRAL_ROOT, DEFAULT_REPORTS_DIR};
use crate::error::{ConfigError, Result};
use std::path::{Component, Path, PathBuf};

impl Config {
    /// Resolve the central section into absolute directories.
    ///
    /// `root` defaults to `.` and is resolved against [`Config::root`];
    /// `reports` and `badges` default to `reports` and `badges` and are
    /// resolved against the central root.
    pub fn build_central(&self) -> Result<CentralConfig> {
        let Some(central) = &self.central else {
            return Err(ConfigError::Central("central not set".to_string()));
        };

        let root = resolve_dir(&self.root(), &central.root, DEFAULT_CENTRAL_ROOT);
        let reports = resolve_dir(&root, &central.reports, DEFAULT_REPORTS_DIR);
        let badges = resolve_dir(&root, &central.badges, DEFAULT_BADGES_DIR);

        Ok(CentralConfig {
            enable: central.enable,
            root: root.to_string_lossy().into_owned(),
            reports: reports.to_string_lossy().into_owned(),
            badges: badges.to_string_lossy().into_owned(),
        })
    }
}

fn resolve_dir(base: &Path, value: &str, default: &str) -> PathBuf {
    let value = if value.is_empty() { default } else { value };
    clean_path(&base.join(value))
}

/// Lexically normalize a path: drop `.` and fold `..` where possible.
fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
