//! Variables visible to gating expressions.

use super::value::Value;
use crate::env::EnvSnapshot;
use crate::event::GithubEvent;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::collections::BTreeMap;

/// Top-level variables for condition evaluation.
///
/// | name                | type                  |
/// |---------------------|-----------------------|
/// | `year`              | int                   |
/// | `month`             | int (1-12)            |
/// | `day`               | int                   |
/// | `hour`              | int (0-23)            |
/// | `weekday`           | int (0=Sunday)        |
/// | `github.event_name` | string                |
/// | `github.event`      | event payload         |
/// | `env`               | map of string→string  |
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionContext {
    vars: BTreeMap<String, Value>,
}

impl ConditionContext {
    /// Assemble the context from a clock reading, a decoded event and an environment snapshot.
    ///
    /// Date fields are taken in UTC.
    pub fn new(now: DateTime<Utc>, event: &GithubEvent, env: &EnvSnapshot) -> Self {
        let github = BTreeMap::from([
            ("event_name".to_string(), Value::Str(event.name.clone())),
            ("event".to_string(), Value::from(event.payload.clone())),
        ]);
        let env = env
            .vars()
            .iter()
            .map(|(k, v)| (k.clone(), Value::Str(v.clone())))
            .collect();

        let vars = BTreeMap::from([
            ("year".to_string(), Value::Int(i64::from(now.year()))),
            ("month".to_string(), Value::Int(i64::from(now.month()))),
            ("day".to_string(), Value::Int(i64::from(now.day()))),
            ("hour".to_string(), Value::Int(i64::from(now.hour()))),
            (
                "weekday".to_string(),
                Value::Int(i64::from(now.weekday().num_days_from_sunday())),
            ),
            ("github".to_string(), Value::Map(github)),
            ("env".to_string(), Value::Map(env)),
        ]);
        Self { vars }
    }

    /// Assemble the context using the current time.
    pub fn now(event: &GithubEvent, env: &EnvSnapshot) -> Self {
        Self::new(Utc::now(), event, env)
    }

    pub fn vars(&self) -> &BTreeMap<String, Value> {
        &self.vars
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}
