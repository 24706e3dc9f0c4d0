//! Configgen command report data structures.

use std::path::PathBuf;

use veneer_core::WriteResult;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ConfiggenReport {
    pub interface_count: usize,
    pub target: ConfigTarget,
    /// Methods the generated config could not settle.
    pub warnings: Vec<String>,
}

/// Where the generated config went.
#[derive(Debug)]
pub enum ConfigTarget {
    /// Rendered YAML, header included.
    Stdout(String),
    File { path: PathBuf, result: WriteResult },
}

impl Report for ConfiggenReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        match &self.target {
            ConfigTarget::Stdout(yaml) => out.preformatted(yaml),
            ConfigTarget::File {
                path,
                result: WriteResult::Written,
            } => {
                out.key_value("Wrote", &path.display().to_string());
                out.preformatted(&format!("{} interface(s) configured", self.interface_count));
            }
            ConfigTarget::File {
                path,
                result: WriteResult::Skipped,
            } => out.warning(&format!(
                "warning: {} already exists, pass --force to replace it",
                path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_skipped_file_warns() {
        let report = ConfiggenReport {
            interface_count: 1,
            target: ConfigTarget::File {
                path: PathBuf::from("library_gapic.yaml"),
                result: WriteResult::Skipped,
            },
            warnings: Vec::new(),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert!(out.stdout.is_empty());
        assert_eq!(
            out.stderr,
            vec!["warning: library_gapic.yaml already exists, pass --force to replace it"]
        );
    }

    #[test]
    fn test_inference_warnings_precede_output() {
        let report = ConfiggenReport {
            interface_count: 1,
            target: ConfigTarget::File {
                path: PathBuf::from("library_gapic.yaml"),
                result: WriteResult::Written,
            },
            warnings: vec!["page streaming resource field could not be determined".into()],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.stderr,
            vec!["warning: page streaming resource field could not be determined"]
        );
        assert_eq!(
            out.stdout,
            vec!["Wrote: library_gapic.yaml", "1 interface(s) configured"]
        );
    }
}
