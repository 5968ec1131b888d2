//! Payload readers turning serialized symbol data into [`Entry`] records.
//!
//! Two forms are understood:
//!
//! - Doxygen `searchData` JavaScript files ([`search_data`])
//! - JSON arrays of [`Entry`] in their serde representation

pub mod search_data;

use crate::index::Entry;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use search_data::parse_search_data;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("Invalid record {record}: {message}")]
    Shape { record: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payload encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    SearchData,
    Json,
}

impl PayloadFormat {
    /// Pick a format from the file extension (`.json`, anything else is searchData)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PayloadFormat::Json,
            _ => PayloadFormat::SearchData,
        }
    }
}

/// Parse a JSON array of entries
pub fn parse_json(text: &str) -> Result<Vec<Entry>, PayloadError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse `text` in the given format
pub fn parse_payload(text: &str, format: PayloadFormat) -> Result<Vec<Entry>, PayloadError> {
    match format {
        PayloadFormat::SearchData => parse_search_data(text),
        PayloadFormat::Json => parse_json(text),
    }
}

/// Read and parse one payload file
pub fn read_payload(path: &Path) -> Result<Vec<Entry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entries = parse_payload(&text, PayloadFormat::from_path(path))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = entries.len(), "payload read");
    Ok(entries)
}

/// Read several payload files and concatenate their records in order
pub fn read_payloads<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for path in paths {
        entries.extend(read_payload(path.as_ref())?);
    }
    Ok(entries)
}
