//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Expand a leading `~` (and `$VARS`) in a user-supplied path.
///
/// Falls back to the literal path when expansion fails.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Map an `std::io::Error` to the crate error, keeping `NotFound` distinct.
pub fn map_io_error(err: std::io::Error, path: &Path, operation: &str) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::file_not_found(path.display().to_string())
    } else {
        Error::internal_io(err.to_string(), Some(operation.to_string()))
    }
}

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| map_io_error(e, path, operation))
}

/// Read file bytes with standardized error handling.
pub fn read_file_bytes(path: &Path, operation: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| map_io_error(e, path, operation))
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: impl AsRef<[u8]>, operation: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| map_io_error(e, path, operation))
}

/// Write content to file, appending when `append` is set.
///
/// The file is created when missing in both modes.
pub fn write_file_mode(
    path: &Path,
    content: impl AsRef<[u8]>,
    append: bool,
    operation: &str,
) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|e| map_io_error(e, path, operation))?;

    file.write_all(content.as_ref())
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_not_found_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "file.not_found");
    }

    #[test]
    fn write_file_returns_error_for_invalid_path() {
        let result = write_file(
            Path::new("/nonexistent/dir/file.txt"),
            "content",
            "test write",
        );
        assert!(result.is_err());
    }

    #[test]
    fn write_file_mode_appends() {
        let temp = NamedTempFile::new().unwrap();
        write_file_mode(temp.path(), "one,", false, "test").unwrap();
        write_file_mode(temp.path(), "two", true, "test").unwrap();
        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "one,two");
    }

    #[test]
    fn write_file_mode_truncates_without_append() {
        let temp = NamedTempFile::new().unwrap();
        write_file_mode(temp.path(), "long content", false, "test").unwrap();
        write_file_mode(temp.path(), "short", false, "test").unwrap();
        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "short");
    }

    #[test]
    fn expand_path_keeps_plain_paths() {
        assert_eq!(
            expand_path(Path::new("/var/data/file.txt")),
            PathBuf::from("/var/data/file.txt")
        );
    }
}
