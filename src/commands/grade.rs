//! `grade`: print a color band.

use crate::cli::GradeArgs;
use crate::error::Result;
use crate::grade::{coverage_band, ratio_band};
use std::io::Write;

pub fn cmd_grade(args: &GradeArgs, out: &mut dyn Write) -> Result<()> {
    let band = match (args.coverage, args.ratio) {
        (Some(coverage), _) => coverage_band(coverage),
        (None, Some(ratio)) => ratio_band(ratio),
        // clap requires one of the two
        (None, None) => return Ok(()),
    };
    writeln!(out, "{} {}", band, band.hex())?;
    Ok(())
}
