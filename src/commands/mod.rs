//! Command implementations for octocov-config.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command except `grade` loads and builds the
//! config first.

mod accept;
mod central;
mod classify;
mod datastore;
mod grade;
mod show;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::env::EnvSnapshot;
use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation, writing its output to `out`.
pub fn dispatch(cli: Cli, env: &EnvSnapshot, out: &mut dyn Write) -> Result<()> {
    if let Command::Grade(args) = &cli.command {
        return grade::cmd_grade(args, out);
    }

    let wd = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config = load_config(wd, cli.config.as_deref(), env)?;

    match cli.command {
        Command::Show(args) => show::cmd_show(&config, &args, out),
        Command::Datastore => datastore::cmd_datastore(&config, env, out),
        Command::Central => central::cmd_central(&config, out),
        Command::Accept(args) => accept::cmd_accept(&config, &args, out),
        Command::Classify(args) => classify::cmd_classify(&config, &args, out),
        Command::Grade(_) => unreachable!("grade is dispatched before loading the config"),
    }
}

/// Locate, load and build the config for a working directory.
pub fn load_config(wd: PathBuf, explicit: Option<&Path>, env: &EnvSnapshot) -> Result<Config> {
    let mut config = Config::new(wd);
    config.load(explicit)?;
    config.build(env);
    Ok(config)
}
