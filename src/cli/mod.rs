//! CLI argument parsing for octocov-config.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve, validate and inspect the octocov configuration of a repository.
///
/// The config is read from `.octocov.yml` or `octocov.yml` in the working
/// directory unless `--config` names a file.
#[derive(Parser, Debug)]
#[command(name = "octocov-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file, relative to the working directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Working directory (default: current directory).
    #[arg(short = 'C', long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration.
    Show(ShowArgs),

    /// Evaluate `datastore.if` and validate the datastore target.
    ///
    /// Prints the target when the report would be stored.
    Datastore,

    /// Resolve the central repository directories.
    Central,

    /// Check a coverage percentage against `coverage.acceptable`.
    Accept(AcceptArgs),

    /// Print the color band of a coverage percentage or code-to-test ratio.
    Grade(GradeArgs),

    /// Classify paths as code or test using `codeToTestRatio` patterns.
    Classify(ClassifyArgs),
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `accept` command.
#[derive(Parser, Debug)]
pub struct AcceptArgs {
    /// Actual coverage percentage.
    pub percent: f64,
}

/// Arguments for the `grade` command.
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("value").required(true).args(["coverage", "ratio"])))]
pub struct GradeArgs {
    /// Coverage percentage (0-100).
    #[arg(long)]
    pub coverage: Option<f64>,

    /// Code-to-test ratio.
    #[arg(long)]
    pub ratio: Option<f64>,
}

/// Arguments for the `classify` command.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Paths relative to the repository root.
    #[arg(required = true)]
    pub paths: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_show_with_global_flags() {
        let cli = Cli::try_parse_from([
            "octocov-config",
            "show",
            "--json",
            "-C",
            "/repo",
            "--config",
            "ci/octocov.yml",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.dir, Some(PathBuf::from("/repo")));
        assert_eq!(cli.config, Some(PathBuf::from("ci/octocov.yml")));
        let Command::Show(args) = cli.command else {
            panic!("Expected Show command");
        };
        assert!(args.json);
    }

    #[test]
    fn parse_accept() {
        let cli = Cli::try_parse_from(["octocov-config", "accept", "72.5"]).unwrap();
        let Command::Accept(args) = cli.command else {
            panic!("Expected Accept command");
        };
        assert_eq!(args.percent, 72.5);
    }

    #[test]
    fn grade_requires_exactly_one_value() {
        assert!(Cli::try_parse_from(["octocov-config", "grade"]).is_err());
        assert!(
            Cli::try_parse_from(["octocov-config", "grade", "--coverage", "1", "--ratio", "1"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["octocov-config", "grade", "--ratio", "1.1"]).unwrap();
        let Command::Grade(args) = cli.command else {
            panic!("Expected Grade command");
        };
        assert_eq!(args.ratio, Some(1.1));
        assert_eq!(args.coverage, None);
    }

    #[test]
    fn classify_requires_paths() {
        assert!(Cli::try_parse_from(["octocov-config", "classify"]).is_err());
    }

    #[test]
    fn parse_datastore_and_central() {
        let cli = Cli::try_parse_from(["octocov-config", "datastore"]).unwrap();
        assert!(matches!(cli.command, Command::Datastore));
        let cli = Cli::try_parse_from(["octocov-config", "central"]).unwrap();
        assert!(matches!(cli.command, Command::Central));
    }
}
