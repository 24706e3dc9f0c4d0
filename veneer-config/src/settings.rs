//! Project settings read from `veneer.toml`.
//!
//! ```toml
//! model = "library.toml"
//! config = "library_gapic.yaml"
//! language = "java"
//! output = "generated"
//!
//! [paging]
//! page_size_names = ["pageSize", "page_size", "maxResults"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use veneer_model::ApiSource;

use crate::{Error, Language, Result, error::SourceContext};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSettings {
    /// API description file.
    pub model: PathBuf,
    /// Format of `model`; detected from the extension when absent.
    #[serde(default, deserialize_with = "deserialize_source")]
    pub source: Option<ApiSource>,
    /// Generation config file.
    pub config: PathBuf,
    pub language: Language,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub paging: PagingOverrides,
}

/// Replacement name sets for page-streaming detection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagingOverrides {
    #[serde(default)]
    pub page_token_names: Option<Vec<String>>,
    #[serde(default)]
    pub page_size_names: Option<Vec<String>>,
    #[serde(default)]
    pub next_page_token_names: Option<Vec<String>>,
}

fn default_output() -> PathBuf {
    PathBuf::from("generated")
}

fn deserialize_source<'de, D>(deserializer: D) -> std::result::Result<Option<ApiSource>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None => Ok(None),
        Some("proto") => Ok(Some(ApiSource::Proto)),
        Some("discovery") => Ok(Some(ApiSource::Discovery)),
        Some(other) => Err(D::Error::custom(format!(
            "unknown source '{}', expected 'proto' or 'discovery'",
            other
        ))),
    }
}

impl ProjectSettings {
    /// Read settings and make relative paths relative to the settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let mut settings = Self::from_str_with_filename(&content, &path.display().to_string())?;

        if let Some(base) = path.parent() {
            settings.model = base.join(&settings.model);
            settings.config = base.join(&settings.config);
            settings.output = base.join(&settings.output);
        }
        Ok(settings)
    }

    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        toml::from_str(content).map_err(|e| ctx.toml_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_settings() {
        let settings = ProjectSettings::from_str_with_filename(
            r#"
            model = "library.toml"
            config = "library.yaml"
            language = "python"
            "#,
            "veneer.toml",
        )
        .expect("settings should parse");

        assert_eq!(settings.language, Language::Python);
        assert_eq!(settings.output, PathBuf::from("generated"));
        assert!(settings.source.is_none());
        assert!(settings.paging.page_token_names.is_none());
    }

    #[test]
    fn test_source_and_paging() {
        let settings = ProjectSettings::from_str_with_filename(
            r#"
            model = "compute.json"
            source = "discovery"
            config = "compute.yaml"
            language = "go"

            [paging]
            page_size_names = ["maxResults"]
            "#,
            "veneer.toml",
        )
        .unwrap();

        assert_eq!(settings.source, Some(ApiSource::Discovery));
        assert_eq!(
            settings.paging.page_size_names.as_deref(),
            Some(&["maxResults".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ProjectSettings::from_str_with_filename(
            r#"
            model = "a.toml"
            config = "a.yaml"
            language = "java"
            colour = "blue"
            "#,
            "veneer.toml",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Toml { .. }));
    }
}
