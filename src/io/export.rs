//! Read/write result bundles as JSON.
//!
//! The exported file is the portable form of a run: it can be handed to a
//! dashboard as-is, or reloaded with `econ plot --bundle` for a quick look.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::ResultBundle;
use crate::error::AppError;

/// Serialize a bundle to pretty JSON.
pub fn bundle_to_json(bundle: &ResultBundle) -> Result<String, AppError> {
    serde_json::to_string_pretty(bundle)
        .map_err(|e| AppError::io(format!("Failed to serialize result bundle: {e}")))
}

/// Write a bundle JSON file.
pub fn write_bundle_json(path: &Path, bundle: &ResultBundle) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create bundle JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, bundle)
        .map_err(|e| AppError::io(format!("Failed to write bundle JSON: {e}")))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::io(format!("Failed to write bundle JSON: {e}")))?;

    Ok(())
}

/// Read a bundle JSON file.
pub fn read_bundle_json(path: &Path) -> Result<ResultBundle, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open bundle JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::io(format!("Invalid bundle JSON: {e}")))
}
