//! Reading chat export uploads from disk.
//!
//! Only `.csv` files up to the configured size are accepted; both checks
//! run before any byte is read.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, Result};

/// Accepted upload extension.
const CSV_EXTENSION: &str = "csv";

/// Checks name and size of an upload without reading it.
///
/// # Errors
/// Returns `UnsupportedFile` for a non-`.csv` name and `FileTooLarge` when
/// `size` exceeds `limit`.
pub fn validate_upload(path: &Path, size: u64, limit: u64) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));

    if !is_csv {
        return Err(AppError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    if size > limit {
        return Err(AppError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }

    Ok(())
}

/// Reads an upload after validating it.
///
/// # Errors
/// Returns error if validation fails or the file cannot be read.
pub fn read_upload(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)
        .map_err(|e| AppError::io(format!("Failed to stat {}", path.display()), e))?;

    validate_upload(path, metadata.len(), limit)?;

    let bytes = fs::read(path)
        .map_err(|e| AppError::io(format!("Failed to read {}", path.display()), e))?;

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(bytes)
}
