//! minipod — add CocoaPods specs to a private spec mirror.
//!
//! # Usage
//!
//! ```text
//! minipod add <podName> <podVersion> [-r <repoName>] [--dry-run]
//! minipod config
//! ```

mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use commands::{add::AddArgs, config::ConfigArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "minipod",
    version,
    about = "Add pod specs from the CocoaPods trunk to a private spec repo",
    long_about = None,
    arg_required_else_help = true,
    after_help = "Examples:\n\n  $ minipod add AFNetworking 3.1.0\n  $ minipod add AFNetworking 3.1.0 -r 18plan",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download a pod spec and commit it to a repo under ~/.cocoapods/repos.
    Add(AddArgs),

    /// Print the effective configuration.
    Config(ConfigArgs),

    /// Any other command word: show help, do nothing.
    #[command(external_subcommand)]
    Other(Vec<OsString>),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Add(args) => args.run(),
        Commands::Config(args) => args.run(),
        Commands::Other(args) => {
            tracing::debug!("unknown command {:?}; showing help", args.first());
            Cli::command()
                .print_help()
                .context("failed to print help")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    init_logging();
    run(Cli::parse())
}
