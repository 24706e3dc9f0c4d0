use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ApiSource;

/// Result type for model loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse proto descriptor")]
    #[diagnostic(code(veneer::model::toml))]
    Toml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse discovery document")]
    #[diagnostic(code(veneer::model::json))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown type '{name}' referenced by {context}")]
    #[diagnostic(
        code(veneer::model::unknown_type),
        help("declare the type under [[messages]] or [[enums]], or use a scalar type name")
    )]
    UnknownType { name: String, context: String },

    #[error("type '{name}' is declared more than once")]
    #[diagnostic(code(veneer::model::duplicate_type))]
    DuplicateType { name: String },

    #[error("map key of field '{field}' must be a scalar type, got '{name}'")]
    #[diagnostic(code(veneer::model::invalid_map_key))]
    InvalidMapKey { name: String, field: String },

    #[error("{operation} is not available for {api_source} model types")]
    #[diagnostic(code(veneer::model::unsupported))]
    UnsupportedOperation {
        operation: &'static str,
        api_source: ApiSource,
    },

    #[error("cannot tell the source format of '{path}'")]
    #[diagnostic(help("use a .toml proto descriptor or a .json discovery document"))]
    UnknownFormat { path: PathBuf },
}

impl Error {
    pub(crate) fn toml(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Toml {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub(crate) fn json(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(|at| SourceSpan::from(at..at));
        Box::new(Error::Json {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    pub(crate) fn unknown_type(name: impl Into<String>, context: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownType {
            name: name.into(),
            context: context.into(),
        })
    }
}

/// Byte offset of a 1-based line and column.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}
