//! Input validation primitives.
//!
//! Provides ergonomic helpers for the preconditions every helper checks
//! before touching its input:
//! - Validating non-empty strings, slices and paths
//! - Requiring a path to exist before operating on it
//!
//! These replace verbose `if ... { return Err(Error::...) }` chains.

use std::path::Path;

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns the untrimmed input on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(value)
    }
}

/// Require a collection to be non-empty.
pub fn require_non_empty_slice<'a, T>(
    items: &'a [T],
    field: &str,
    message: &str,
) -> Result<&'a [T]> {
    if items.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(items)
    }
}

/// Require a path to be non-empty (blank paths count as empty).
pub fn require_path(path: &Path) -> Result<&Path> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            "path",
            "The given path must not be empty",
            None,
        ));
    }
    Ok(path)
}

/// Require a non-empty path that points at an existing filesystem entry.
///
/// Fails with `file.not_found` before the caller attempts the operation.
pub fn require_existing(path: &Path) -> Result<&Path> {
    require_path(path)?;
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    Ok(path)
}
