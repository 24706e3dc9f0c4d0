use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::project::ProjectArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output directory (overrides veneer.toml, defaults to ./generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the view models instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the run after every phase to this directory
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.project.load()?;
        let output_dir = self
            .output
            .clone()
            .or_else(|| project.output.clone())
            .unwrap_or_else(|| PathBuf::from("generated"));

        let report = ops::generate(
            project,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                snapshot_dir: self.snapshot.as_deref(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
