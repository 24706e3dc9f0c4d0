//! Generate command report data structures.

use std::path::PathBuf;

use veneer_config::Language;

use super::output::{Output, Report};

/// Report data from view-model generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub language: Language,
    /// Package name the views were generated for.
    pub package_name: String,
    /// Warning messages from pipeline.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
}

/// Result of generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Written file paths, relative to `output_dir`.
    pub files: Vec<String>,
    /// Path to pipeline snapshots, if requested.
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(snapshot_dir) = &written.snapshot_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &snapshot_dir.display().to_string(),
            );
            out.newline();
        }

        out.preformatted(&format!("{} ({})", self.package_name, self.language));
        out.newline();

        out.section(&format!("Generated in {}", written.output_dir.display()));
        for file in &written.files {
            out.added_item(file);
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_written_report() {
        let report = GenerateReport {
            language: Language::Ruby,
            package_name: "Google::Cloud::Example::Library::V1".into(),
            warnings: vec![],
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("generated"),
                files: vec!["library_service.json".into()],
                snapshot_dir: None,
            }),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(out.stderr.is_empty());
        assert_eq!(
            out.stdout,
            vec![
                "Google::Cloud::Example::Library::V1 (ruby)",
                "",
                "Generated in generated:",
                "  + library_service.json",
            ]
        );
    }

    #[test]
    fn test_preview_report() {
        let report = GenerateReport {
            language: Language::Java,
            package_name: "com.google.cloud.example.library.v1".into(),
            warnings: vec!["two repeated fields".into()],
            result: GenerationResult::Preview(PreviewResult {
                files: vec![PreviewFile {
                    path: "library_service.json".into(),
                    content: "{}".into(),
                }],
            }),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.stderr, vec!["warning: two repeated fields"]);
        assert_eq!(
            out.stdout,
            vec![
                "── library_service.json ──",
                "{}",
                "── Summary ──",
                "1 files would be generated",
            ]
        );
    }
}
