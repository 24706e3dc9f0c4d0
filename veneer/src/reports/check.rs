//! Check command report data structures.

use std::path::PathBuf;

use veneer_config::Language;

use super::output::{Output, Report};

/// Report data from config validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the generation config.
    pub config_path: PathBuf,
    pub language: Language,
    /// Interfaces that assembled cleanly.
    pub interfaces: Vec<InterfaceSummary>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

#[derive(Debug)]
pub struct InterfaceSummary {
    pub name: String,
    pub method_count: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!(
            "✓ {} is valid for {}",
            self.config_path.display(),
            self.language
        ));
        out.newline();
        out.section(&format!("Interfaces ({})", self.interfaces.len()));
        for interface in &self.interfaces {
            let plural = if interface.method_count == 1 { "" } else { "s" };
            out.list_item(&format!(
                "{} ({} method{})",
                interface.name, interface.method_count, plural
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_valid_report() {
        let report = CheckReport {
            config_path: PathBuf::from("library.yaml"),
            language: Language::Go,
            interfaces: vec![InterfaceSummary {
                name: "google.example.library.v1.LibraryService".into(),
                method_count: 1,
            }],
            errors: vec![],
            warnings: vec!["ambiguous page streaming\n  --> LibraryService.FindRelatedBooks".into()],
            infos: vec![],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.stderr,
            vec!["warning: ambiguous page streaming\n  --> LibraryService.FindRelatedBooks"]
        );
        assert_eq!(
            out.stdout,
            vec![
                "",
                "✓ library.yaml is valid for go",
                "",
                "Interfaces (1):",
                "  - google.example.library.v1.LibraryService (1 method)",
            ]
        );
    }

    #[test]
    fn test_errors_suppress_summary() {
        let report = CheckReport {
            config_path: PathBuf::from("library.yaml"),
            language: Language::Java,
            interfaces: vec![],
            errors: vec!["interface not found".into()],
            warnings: vec![],
            infos: vec![],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.stderr, vec!["error: interface not found"]);
        assert_eq!(out.stdout, vec![""]);
    }
}
