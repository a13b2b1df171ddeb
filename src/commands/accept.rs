//! `accept`: minimum coverage check.

use crate::cli::AcceptArgs;
use crate::config::Config;
use crate::error::Result;
use std::io::Write;

pub fn cmd_accept(config: &Config, args: &AcceptArgs, out: &mut dyn Write) -> Result<()> {
    config.acceptable(&args.percent)?;
    match config.coverage.acceptable.as_deref().filter(|a| !a.is_empty()) {
        Some(acceptable) => writeln!(
            out,
            "code coverage is {:.1}%, accepted (minimum {})",
            args.percent, acceptable
        )?,
        None => writeln!(out, "code coverage is {:.1}%, no minimum set", args.percent)?,
    }
    Ok(())
}
