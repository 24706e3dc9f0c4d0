//! Configgen operation - a starting generation config for a model.

use std::path::Path;

use eyre::{Context, Result};
use veneer_codegen::{configgen as generate_config, language::LanguageFormatterRegistry};
use veneer_core::{File, FileRules, Overwrite};
use veneer_model::ApiModel;

use super::describe;
use crate::reports::{ConfiggenReport, ConfigTarget};

const HEADER: &str = "# Generated by `veneer configgen`. Review every inferred value before use.";

/// Options for the configgen operation.
pub struct ConfiggenOptions<'a> {
    /// File to write; stdout when absent.
    pub output: Option<&'a Path>,
    /// Replace an existing file.
    pub force: bool,
}

/// Execute the configgen operation.
pub fn configgen(model: &ApiModel, opts: ConfiggenOptions) -> Result<ConfiggenReport> {
    let generated = generate_config(model, &LanguageFormatterRegistry::new());
    let config = generated.config;
    let yaml = config
        .to_yaml()
        .wrap_err("Failed to serialize generation config")?;
    let file = File::new(opts.output.unwrap_or(Path::new("gapic.yaml")), yaml).with_rules(FileRules {
        overwrite: if opts.force {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        },
        header: Some(HEADER),
    });

    let target = match opts.output {
        Some(path) => {
            // An empty base leaves the path as given
            let result = file
                .write(Path::new(""))
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            ConfigTarget::File {
                path: path.to_path_buf(),
                result,
            }
        }
        None => ConfigTarget::Stdout(file.render()),
    };

    Ok(ConfiggenReport {
        interface_count: config.interfaces.len(),
        target,
        warnings: generated.warnings.iter().map(describe).collect(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use veneer_config::parse_config;
    use veneer_core::WriteResult;
    use veneer_model::load_proto_str;

    use super::*;
    use crate::ops::testing::LIBRARY_MODEL;

    fn model() -> ApiModel {
        load_proto_str(LIBRARY_MODEL, "library.toml").unwrap()
    }

    #[test]
    fn test_stdout_output_parses_back() {
        let report = configgen(
            &model(),
            ConfiggenOptions {
                output: None,
                force: false,
            },
        )
        .unwrap();

        let ConfigTarget::Stdout(yaml) = &report.target else {
            panic!("expected stdout output");
        };
        assert!(yaml.starts_with(HEADER));
        let config = parse_config(yaml, "gapic.yaml").unwrap();
        assert_eq!(config.interfaces.len(), report.interface_count);
        assert_eq!(
            report.warnings,
            vec![
                "page streaming resource field could not be determined for method \
                 FindRelatedBooks: candidates are names, shelves\n  --> LibraryService.FindRelatedBooks"
            ]
        );
    }

    #[test]
    fn test_existing_file_needs_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("library_gapic.yaml");
        std::fs::write(&path, "# hand edited").unwrap();

        let skipped = configgen(
            &model(),
            ConfiggenOptions {
                output: Some(&path),
                force: false,
            },
        )
        .unwrap();
        assert!(matches!(
            skipped.target,
            ConfigTarget::File {
                result: WriteResult::Skipped,
                ..
            }
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hand edited");

        let forced = configgen(
            &model(),
            ConfiggenOptions {
                output: Some(&path),
                force: true,
            },
        )
        .unwrap();
        assert!(matches!(
            forced.target,
            ConfigTarget::File {
                result: WriteResult::Written,
                ..
            }
        ));
        assert!(std::fs::read_to_string(&path).unwrap().contains("LibraryService"));
    }
}
