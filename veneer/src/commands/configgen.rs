use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use veneer_model::ApiModel;

use super::UnwrapOrExit;
use crate::{
    ops::{self, ConfiggenOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ConfiggenCommand {
    /// API description file (.toml descriptor or .json discovery document)
    pub model: PathBuf,

    /// Write the config to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl ConfiggenCommand {
    pub fn run(&self) -> Result<()> {
        let model = ApiModel::from_file(&self.model, None).unwrap_or_exit();

        let report = ops::configgen(
            &model,
            ConfiggenOptions {
                output: self.output.as_deref(),
                force: self.force,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
