//! GitHub Actions event decoding.
//!
//! Actions exposes the triggering event through `GITHUB_EVENT_NAME` and a
//! JSON payload file named by `GITHUB_EVENT_PATH`. Decoding is best-effort:
//! outside Actions, or when the payload is unreadable, the event is empty.

use crate::env::EnvSnapshot;
use log::debug;
use serde_json::Value;
use std::fs;

pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
pub const GITHUB_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

/// The event that triggered the current workflow run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GithubEvent {
    /// Event name, e.g. `push` or `pull_request`. Empty when unknown.
    pub name: String,
    /// Decoded webhook payload. `Null` when unknown.
    pub payload: Value,
}

impl GithubEvent {
    /// Decode the event described by the environment.
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let name = env.get_or_empty(GITHUB_EVENT_NAME).to_string();
        let payload = match env.get(GITHUB_EVENT_PATH).filter(|p| !p.is_empty()) {
            Some(path) => read_payload(path),
            None => Value::Null,
        };
        Self { name, payload }
    }
}

fn read_payload(path: &str) -> Value {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("failed to read event payload '{}': {}", path, e);
            return Value::Null;
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        debug!("failed to parse event payload '{}': {}", path, e);
        Value::Null
    })
}
