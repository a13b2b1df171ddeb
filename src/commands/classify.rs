//! `classify`: sort paths into code and test files.

use crate::cli::ClassifyArgs;
use crate::config::{Config, FileRole};
use crate::error::Result;
use std::io::Write;

pub fn cmd_classify(config: &Config, args: &ClassifyArgs, out: &mut dyn Write) -> Result<()> {
    let matcher = config
        .code_to_test_ratio
        .clone()
        .unwrap_or_default()
        .matcher()?;

    for path in &args.paths {
        let role = match matcher.classify(path) {
            Some(FileRole::Code) => "code",
            Some(FileRole::Test) => "test",
            None => "-",
        };
        writeln!(out, "{}\t{}", role, path)?;
    }
    Ok(())
}
