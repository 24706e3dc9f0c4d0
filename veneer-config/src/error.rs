use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for config parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a YAML error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from(loc.index()..loc.index()));
        Box::new(Error::Yaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a TOML error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Toml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a duplicate-name error pointing at the second declaration.
    pub fn duplicate_error(
        &self,
        kind: &'static str,
        name: impl Into<String>,
        context: impl Into<String>,
    ) -> Box<Error> {
        let name = name.into();
        Box::new(Error::Duplicate {
            span: find_nth_span(&self.src, &name, 1),
            src: self.named_source(),
            kind,
            name,
            context: context.into(),
        })
    }

    /// Create a validation error, labelled at the first occurrence of `needle` if given.
    pub fn validation_error(&self, message: impl Into<String>, needle: Option<&str>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: needle.and_then(|n| find_nth_span(&self.src, n, 0)),
            message: message.into(),
        })
    }
}

/// Span of the `nth` (0-based) occurrence of `name` in the source.
fn find_nth_span(src: &str, name: &str, nth: usize) -> Option<SourceSpan> {
    if name.is_empty() {
        return None;
    }
    src.match_indices(name)
        .nth(nth)
        .map(|(offset, _)| SourceSpan::from(offset..offset + name.len()))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse generation config")]
    #[diagnostic(code(veneer::config::parse_error))]
    Yaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse veneer.toml")]
    #[diagnostic(code(veneer::settings::parse_error))]
    Toml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate {kind} '{name}' in {context}")]
    #[diagnostic(
        code(veneer::config::duplicate),
        help("each {kind} may be declared only once; merge the two entries")
    )]
    Duplicate {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        kind: &'static str,
        name: String,
        context: String,
    },

    #[error("{message}")]
    #[diagnostic(code(veneer::config::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
