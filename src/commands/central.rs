//! `central`: resolve central repository directories.

use crate::config::Config;
use crate::error::Result;
use std::io::Write;

pub fn cmd_central(config: &Config, out: &mut dyn Write) -> Result<()> {
    let central = config.build_central()?;
    writeln!(out, "enable: {}", central.enable)?;
    writeln!(out, "root: {}", central.root)?;
    writeln!(out, "reports: {}", central.reports)?;
    writeln!(out, "badges: {}", central.badges)?;
    Ok(())
}
