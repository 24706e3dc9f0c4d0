use std::path::PathBuf;

use clap::Args;
use eyre::{Result, eyre};
use veneer_codegen::resolve::ResolveOptions;
use veneer_config::{ConfigProto, Language, ProjectSettings};
use veneer_model::ApiModel;

use super::UnwrapOrExit;
use crate::ops::Project;

/// Input selection shared by the commands that run the generator.
///
/// Values come from `veneer.toml` when it exists; flags override them.
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to veneer.toml (defaults to ./veneer.toml)
    #[arg(short, long, default_value = "veneer.toml")]
    pub settings: PathBuf,

    /// API description file (overrides veneer.toml)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Generation config file (overrides veneer.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target language (overrides veneer.toml)
    #[arg(short, long)]
    pub language: Option<Language>,
}

impl ProjectArgs {
    /// Load the model and config, exiting with a report on parse errors.
    pub fn load(&self) -> Result<Project> {
        let settings = self
            .settings
            .exists()
            .then(|| ProjectSettings::from_file(&self.settings).unwrap_or_exit());

        // A model given on the command line has its format detected from the extension
        let (model_path, source) = match (&self.model, &settings) {
            (Some(path), _) => (path.clone(), None),
            (None, Some(settings)) => (settings.model.clone(), settings.source),
            (None, None) => return Err(self.missing("model")),
        };
        let config_path = self
            .config
            .clone()
            .or_else(|| settings.as_ref().map(|s| s.config.clone()))
            .ok_or_else(|| self.missing("config"))?;
        let language = self
            .language
            .or_else(|| settings.as_ref().map(|s| s.language))
            .ok_or_else(|| self.missing("language"))?;

        let model = ApiModel::from_file(&model_path, source).unwrap_or_exit();
        let config = ConfigProto::from_file(&config_path).unwrap_or_exit();

        let mut options = ResolveOptions::new(language, &model);
        if let Some(settings) = &settings {
            options.paging = options.paging.with_overrides(&settings.paging);
        }
        tracing::debug!(
            model = %model_path.display(),
            config = %config_path.display(),
            %language,
            "Loaded project"
        );

        Ok(Project {
            model,
            config,
            config_path,
            options,
            output: settings.map(|s| s.output),
        })
    }

    fn missing(&self, key: &str) -> eyre::Report {
        eyre!(
            "No {key} given: pass --{key} or set `{key}` in {}",
            self.settings.display()
        )
    }
}
