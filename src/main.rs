//! Entry point for the `octocov-config` CLI. It parses arguments, captures
//! the environment once, dispatches to the command handler, and maps errors
//! to exit codes.

use octocov_config::cli::Cli;
use octocov_config::env::EnvSnapshot;
use octocov_config::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let env = EnvSnapshot::from_process();
    let mut stdout = std::io::stdout().lock();

    match commands::dispatch(cli, &env, &mut stdout) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
