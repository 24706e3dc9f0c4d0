//! Generate operation - view-model JSON from a project.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use veneer_codegen::pipeline::{Pipeline, SnapshotPlugin};
use veneer_core::{File, to_snake_case};
use veneer_viewmodel::ApiView;

use super::{Project, describe};
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for view-model files.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Directory for per-phase snapshots.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// Nothing is written unless the whole pipeline succeeds.
pub fn generate(project: Project, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut pipeline = Pipeline::new();
    if let Some(dir) = opts.snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }

    let language = project.options.language;
    let ctx = pipeline
        .run(project.model, project.config, project.options)
        .wrap_err("Pipeline failed")?;

    let warnings = ctx.warnings().map(describe).collect();
    let view = ctx
        .view
        .ok_or_else(|| eyre!("Pipeline finished without a view model"))?;
    let files = view_files(&view).wrap_err("Failed to serialize view model")?;

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: files
                .iter()
                .map(|file| PreviewFile {
                    path: file.path().display().to_string(),
                    content: file.render(),
                })
                .collect(),
        })
    } else {
        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            file.write(opts.output_dir)
                .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
            written.push(file.path().display().to_string());
        }
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: written,
            snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
        })
    };

    Ok(GenerateReport {
        language,
        package_name: view.package_name,
        warnings,
        result,
    })
}

/// One `<interface_snake>.json` file per interface.
///
/// Each file holds an [`ApiView`] narrowed to its interface.
fn view_files(view: &ApiView) -> Result<Vec<File>> {
    view.interfaces
        .iter()
        .map(|interface| {
            let single = ApiView {
                package_name: view.package_name.clone(),
                language: view.language.clone(),
                interfaces: vec![interface.clone()],
            };
            let json = serde_json::to_string_pretty(&single)?;
            let path = PathBuf::from(format!("{}.json", to_snake_case(&interface.simple_name)));
            Ok(File::new(path, json))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use veneer_config::Language;

    use super::*;
    use crate::ops::testing::{LIBRARY_CONFIG, project, read};

    #[test]
    fn test_writes_one_file_per_interface() {
        let temp = TempDir::new().unwrap();
        let report = generate(
            project(LIBRARY_CONFIG, Language::Python),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
                snapshot_dir: None,
            },
        )
        .unwrap();

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written files");
        };
        assert_eq!(written.files, vec!["library_service.json"]);

        let json = read(temp.path(), "library_service.json");
        assert_eq!(json["language"], "python");
        assert_eq!(json["interfaces"][0]["client_name"], "LibraryServiceClient");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let report = generate(
            project(LIBRARY_CONFIG, Language::Java),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: true,
                snapshot_dir: None,
            },
        )
        .unwrap();

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 1);
        assert!(preview.files[0].content.contains("\"listShelves\""));
        assert!(!temp.path().join("library_service.json").exists());
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let result = generate(
            project(
                "interfaces:\n- name: google.example.library.v1.Missing\n",
                Language::Java,
            ),
            GenerateOptions {
                output_dir: temp.path(),
                dry_run: false,
                snapshot_dir: None,
            },
        );

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_snapshots_are_written() {
        let temp = TempDir::new().unwrap();
        let snapshots = temp.path().join("snapshots");
        generate(
            project(LIBRARY_CONFIG, Language::Java),
            GenerateOptions {
                output_dir: &temp.path().join("out"),
                dry_run: false,
                snapshot_dir: Some(&snapshots),
            },
        )
        .unwrap();

        for phase in ["validate", "resolve", "assemble"] {
            assert!(snapshots.join(format!("{phase}.json")).exists());
        }
        let assembled = read(&snapshots, "assemble.json");
        assert_eq!(assembled["view"]["language"], "java");
    }
}
