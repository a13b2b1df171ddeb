//! `datastore`: gate and validate report persistence.

use crate::condition::ConditionContext;
use crate::config::Config;
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::event::GithubEvent;
use std::io::Write;

pub fn cmd_datastore(config: &Config, env: &EnvSnapshot, out: &mut dyn Write) -> Result<()> {
    let ctx = ConditionContext::now(&GithubEvent::from_env(env), env);
    run(config, &ctx, out)
}

fn run(config: &Config, ctx: &ConditionContext, out: &mut dyn Write) -> Result<()> {
    if config.datastore.is_some() && !config.datastore_ready(ctx) {
        writeln!(out, "skipped: the report would not be stored")?;
        return Ok(());
    }

    let datastore = config.build_datastore()?;
    if let Some(github) = &datastore.github {
        writeln!(out, "repository: {}", github.repository)?;
        writeln!(out, "branch: {}", github.branch)?;
        writeln!(out, "path: {}", github.path)?;
    }
    Ok(())
}
