//! Reading and parsing chat-export documents.
//!
//! The export is a single JSON file; a read or parse failure here is
//! fatal for the whole run. Root-shape validation happens in the
//! extractor, which owns the schema contract.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::{AppError, Result};

/// Reads an export file and parses it as JSON.
///
/// # Errors
/// Returns error if the file is missing, unreadable, or not valid JSON.
pub fn load_export(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(AppError::ExportNotFound {
            path: path.to_path_buf(),
        });
    }

    tracing::info!("Reading export: {}", path.display());

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read export file: {}", path.display()), e))?;

    serde_json::from_str(&raw).map_err(AppError::json_parse)
}
