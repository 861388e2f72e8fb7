//! Error types for schema loading and model conversion.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaType;

/// Errors while reading or parsing a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid schema at {path}: {message}")]
    InvalidSchema { path: String, message: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during conversion of a parsed schema into a model.
///
/// Every variant carries the JSON Pointer of the schema location that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("missing type at {path}: every property must declare a type")]
    MissingType { path: String },

    #[error("unsupported type \"{schema_type}\" at {path}: no primitive counterpart")]
    UnsupportedType {
        path: String,
        schema_type: SchemaType,
    },

    #[error("array at {path} declares no item schema")]
    MissingItems { path: String },

    #[error("array at {path} declares {count} item schemas: exactly one is supported")]
    TupleItems { path: String, count: usize },
}

impl ConvertError {
    /// JSON Pointer of the schema location that failed.
    pub fn path(&self) -> &str {
        match self {
            ConvertError::MissingType { path }
            | ConvertError::UnsupportedType { path, .. }
            | ConvertError::MissingItems { path }
            | ConvertError::TupleItems { path, .. } => path,
        }
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Any failure on the way from schema source to model.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Errors while rendering a model as CSDL XML.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot write XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rendered XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl RenderError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl Error {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Load(e) => e.exit_code(),
            Error::Convert(e) => e.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("schema.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::InvalidSchema {
            path: "/properties/id/type".into(),
            message: "unknown type \"int\"".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn convert_error_exit_codes() {
        let err = ConvertError::MissingType {
            path: "/properties/id".into(),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(Error::from(err).exit_code(), 2);
    }

    #[test]
    fn convert_error_path() {
        let err = ConvertError::TupleItems {
            path: "/properties/pair".into(),
            count: 2,
        };
        assert_eq!(err.path(), "/properties/pair");
    }

    #[test]
    fn render_error_exit_code() {
        let err = RenderError::from(std::io::Error::other("closed"));
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn convert_error_display() {
        let err = ConvertError::UnsupportedType {
            path: "/properties/tags/items".into(),
            schema_type: SchemaType::Object,
        };
        assert_eq!(
            err.to_string(),
            "unsupported type \"object\" at /properties/tags/items: no primitive counterpart"
        );
    }
}
