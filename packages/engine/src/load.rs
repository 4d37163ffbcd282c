//! Loading of request trees and host snapshots from JSON or YAML
//!
//! Both formats go through the same size check before parsing. Files are
//! dispatched on their extension: `.yaml` and `.yml` are read as YAML,
//! everything else as JSON.

use crate::config;
use crate::error::{Result, SplitError};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// Parse a document from a string.
///
/// # Errors
///
/// Returns `SplitError::LoadError` if the content exceeds
/// [`config::MAX_REQUEST_SIZE`], or the parser error otherwise.
pub fn parse_str<T: DeserializeOwned>(content: &str, format: InputFormat) -> Result<T> {
    if content.len() > config::MAX_REQUEST_SIZE {
        tracing::warn!(
            size = content.len(),
            max = config::MAX_REQUEST_SIZE,
            "Input content exceeds size limit"
        );
        return Err(SplitError::LoadError(format!(
            "Content exceeds maximum size limit ({} bytes)",
            config::MAX_REQUEST_SIZE
        )));
    }

    let parsed = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml_ng::from_str(content)?,
    };
    Ok(parsed)
}

/// Read and parse a document from a file.
pub fn read_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path_ref = path.as_ref();
    tracing::debug!(path = %path_ref.display(), "Loading input file");

    let metadata = fs::metadata(path_ref)
        .map_err(|_| SplitError::LoadError("Failed to access input file".to_string()))?;

    let file_size = metadata.len() as usize;
    if file_size > config::MAX_REQUEST_SIZE {
        tracing::warn!(
            size = file_size,
            max = config::MAX_REQUEST_SIZE,
            "Input file exceeds size limit"
        );
        return Err(SplitError::LoadError(format!(
            "File exceeds maximum size limit ({} bytes)",
            config::MAX_REQUEST_SIZE
        )));
    }

    let content = fs::read_to_string(path_ref)
        .map_err(|_| SplitError::LoadError("Failed to read input file".to_string()))?;

    parse_str(&content, InputFormat::from_path(path_ref))
}
