//! Schema loading from various sources.
//!
//! Handles loading schemas from files, strings, stdin and HTTP URLs.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::schema::SchemaNode;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Source name that reads the schema from standard input.
pub const STDIN_SOURCE: &str = "-";

/// Load a schema from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "loaded schema file");
    load_schema_str(&content)
}

/// Load a schema from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_schema_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a schema from standard input.
pub fn load_schema_stdin() -> Result<Value, LoadError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| LoadError::ReadError {
            path: STDIN_SOURCE.into(),
            source,
        })?;
    load_schema_str(&content)
}

/// Load a schema from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails or the response
/// has an error status, or `LoadError::InvalidJson` if the body isn't JSON.
#[cfg(feature = "remote")]
pub fn load_schema_url(url: &str) -> Result<Value, LoadError> {
    let network_error = |source: reqwest::Error| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(network_error)?;

    // Read as text so a non-JSON body surfaces as InvalidJson
    let content = response.text().map_err(network_error)?;
    debug!(url, bytes = content.len(), "fetched schema");
    load_schema_str(&content)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a schema from a file path, URL, or `-` for stdin.
///
/// URL loading requires the `remote` feature.
///
/// # Errors
///
/// Returns appropriate errors based on the source type.
pub fn load_schema_auto(source: &str) -> Result<Value, LoadError> {
    if source == STDIN_SOURCE {
        load_schema_stdin()
    } else if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_schema_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_schema(Path::new(source))
    }
}

/// Parse a loaded JSON document into a schema tree.
///
/// # Errors
///
/// Returns `LoadError::InvalidSchema` with the JSON Pointer of the first
/// malformed keyword.
pub fn parse_schema(value: &Value) -> Result<SchemaNode, LoadError> {
    SchemaNode::from_value(value)
}
