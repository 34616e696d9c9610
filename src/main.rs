//! Jungle CLI - replay action scripts against the rules engine.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Jungle - a deterministic Dou Shou Qi rules engine
#[derive(Parser, Debug)]
#[command(name = "jungle")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the starting board
    Show {
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Play a script of actions against a fresh session
    Play {
        /// Script file, one action per line (e.g. `6,6-5,6` or `3,0x2,0`)
        #[arg(required = true)]
        script: PathBuf,

        /// Session config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// List the legal actions of the side to move at the end
        #[arg(long)]
        legal: bool,

        /// Suppress per-action output
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let env = Env::default().filter_or("JUNGLE_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Show { no_color } => cli::show::execute(!no_color),

        Commands::Play {
            script,
            config,
            format,
            legal,
            quiet,
        } => cli::play::execute(&script, config.as_deref(), format, legal, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
