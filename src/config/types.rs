//! Constants and serde helpers used by the Config tree.

use serde::{Deserialize, Deserializer};

/// Candidate config file names, searched in order when no path is given.
pub const DEFAULT_CONFIG_FILE_PATHS: [&str; 2] = [".octocov.yml", "octocov.yml"];

/// Branch used for the GitHub datastore when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Directory under which reports are stored.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Directory under which badges are stored.
pub const DEFAULT_BADGES_DIR: &str = "badges";

/// Root of the central repository when none is configured.
pub const DEFAULT_CENTRAL_ROOT: &str = ".";

/// Deserialize a field where an explicit `null` means the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a threshold written either as a string (`"75%"`) or a bare number (`75`).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {:?}",
            other
        ))),
    }
}
