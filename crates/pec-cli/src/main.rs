//! Progressive Ensemble Clustering CLI
//!
//! Runs a progressive k-means ensemble over synthetic Gaussian blobs and
//! prints one line per round.
//!
//! # Commands
//!
//! - `run`: Drive an ensemble to completion, streaming each round's consensus
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Configuration error
//! - 2: State or internal failure

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::CliExitCode;

/// Progressive Ensemble Clustering CLI
#[derive(Parser)]
#[command(name = "pec-cli")]
#[command(version)]
#[command(about = "Run progressive k-means ensembles and stream per-round consensus results")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an ensemble to completion over generated blobs
    Run(commands::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Run(args) => commands::run::run_command(args),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "pec-cli", "-vv", "run", "--clusters", "4", "--runs", "6", "--seed", "9", "--init",
            "random", "--policy", "vote", "--parallel", "--format", "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command;
        assert_eq!(args.clusters, Some(4));
        assert_eq!(args.runs, Some(6));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.init.as_deref(), Some("random"));
        assert_eq!(args.policy, commands::run::PolicyName::Vote);
        assert!(args.parallel);
        assert_eq!(args.format, commands::run::OutputFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["pec-cli", "run", "--policy", "median"]).is_err());
    }
}
