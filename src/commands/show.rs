//! `show`: print the resolved configuration.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use std::io::Write;

pub fn cmd_show(config: &Config, args: &ShowArgs, out: &mut dyn Write) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(config).map_err(std::io::Error::from)?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    match config.config_path() {
        Some(path) => writeln!(out, "# config: {}", path.display())?,
        None => writeln!(out, "# config: (none, using defaults)")?,
    }
    write!(out, "{}", config.to_yaml()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: &Config, json: bool) -> String {
        let mut out = Vec::new();
        cmd_show(config, &ShowArgs { json }, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn yaml_output_notes_missing_file() {
        let mut config = Config::new("/work");
        config.repository = "acme/widgets".to_string();
        let output = render(&config, false);
        assert!(output.starts_with("# config: (none, using defaults)\n"));
        assert!(output.contains("repository: acme/widgets"));
    }

    #[test]
    fn json_output_uses_document_keys() {
        let mut config = Config::from_yaml("codeToTestRatio:\n  test: ['tests/**']\n").unwrap();
        config.repository = "acme/widgets".to_string();
        let output = render(&config, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["repository"], "acme/widgets");
        assert_eq!(value["codeToTestRatio"]["test"][0], "tests/**");
        assert!(value.get("datastore").is_none());
    }
}
