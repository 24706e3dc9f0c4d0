//! Generation config parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{ConfigProto, validate::validate_config};
use crate::{Error, Result, error::SourceContext};

impl FromStr for ConfigProto {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "gapic.yaml")
    }
}

impl ConfigProto {
    /// Parse a generation config file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Render the config back to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Parse a config from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<ConfigProto> {
    let source_ctx = SourceContext::new(content, filename);
    let config: ConfigProto =
        serde_yaml::from_str(content).map_err(|e| source_ctx.yaml_error(e))?;
    validate_config(&config, &source_ctx)?;
    Ok(config)
}
