mod check;
mod completions;
mod configgen;
mod generate;
mod project;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use configgen::ConfiggenCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on input-file errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for veneer_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

impl<T> UnwrapOrExit<T> for veneer_model::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(miette::Report::new(*e)),
        }
    }
}

fn exit_with(report: miette::Report) -> ! {
    eprintln!("{:?}", report);
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "veneer")]
#[command(version)]
#[command(about = "Generate client-library view models from API descriptions")]
pub(crate) struct Cli {
    /// Log debug output to stderr (overrides VENEER_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Configgen(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate view-model JSON for every configured interface
    Generate(GenerateCommand),

    /// Validate the generation config against the model without writing output
    Check(CheckCommand),

    /// Generate a starting generation config from the model
    Configgen(ConfiggenCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
