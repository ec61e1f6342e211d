//! File helpers on `Path`.
//!
//! Every helper rejects an empty path with `validation.invalid_argument`.
//! Helpers that act on an existing file check for it first and fail with
//! `file.not_found` instead of surfacing a raw I/O error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::{io, validation};

const HIDDEN_PREFIX: char = '.';

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "path",
                "Path has no file name",
                Some(path.display().to_string()),
            )
        })
}

fn rename_within_parent(path: &Path, name: &str) -> Result<PathBuf> {
    let target = path.with_file_name(name);
    if target.exists() {
        return Err(Error::file_already_exists(target.display().to_string()));
    }
    fs::rename(path, &target).map_err(|e| io::map_io_error(e, path, "rename file"))?;
    Ok(target)
}

fn require_destination(source: &Path, destination: &Path, overwrite: bool) -> Result<()> {
    validation::require_path(destination)?;
    if !destination.exists() {
        return Ok(());
    }
    if !overwrite {
        return Err(Error::file_already_exists(destination.display().to_string()));
    }
    // Copying a file onto itself truncates it before it is read.
    let same_file = match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same_file {
        return Err(Error::validation_invalid_argument(
            "destination",
            "Source and destination are the same file",
            Some(destination.display().to_string()),
        ));
    }
    Ok(())
}

fn file_len(path: &Path) -> Result<u64> {
    validation::require_existing(path)?;
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|e| io::map_io_error(e, path, "read file size"))
}

pub trait PathExt {
    /// True when the path names an existing regular file.
    fn file_exists(&self) -> Result<bool>;
    fn delete_file(&self) -> Result<()>;

    /// Rename to the dot-prefixed name; returns the new path.
    fn hide(&self) -> Result<PathBuf>;
    /// Drop the leading dot; returns the new path.
    fn show(&self) -> Result<PathBuf>;

    fn copy_to(&self, destination: &Path, overwrite: bool) -> Result<()>;
    fn move_to(&self, destination: &Path, overwrite: bool) -> Result<()>;

    fn created_at(&self) -> Result<DateTime<Local>>;
    /// Size in decimal kilobytes.
    fn size_in_kb(&self) -> Result<f64>;
    /// Size in decimal megabytes.
    fn size_in_mb(&self) -> Result<f64>;

    fn read_text(&self) -> Result<String>;
    /// Replace the file contents; blank content is rejected.
    fn write_text(&self, content: &str) -> Result<()>;
    fn append_text(&self, content: &str) -> Result<()>;
    fn read_bytes(&self) -> Result<Vec<u8>>;
    fn write_bytes(&self, bytes: &[u8]) -> Result<()>;
}

impl PathExt for Path {
    fn file_exists(&self) -> Result<bool> {
        validation::require_path(self)?;
        Ok(self.is_file())
    }

    fn delete_file(&self) -> Result<()> {
        validation::require_existing(self)?;
        fs::remove_file(self).map_err(|e| io::map_io_error(e, self, "delete file"))?;
        log_status!("files", "Deleted {}", self.display());
        Ok(())
    }

    fn hide(&self) -> Result<PathBuf> {
        validation::require_existing(self)?;
        let name = file_name(self)?;
        if name.starts_with(HIDDEN_PREFIX) {
            return Ok(self.to_path_buf());
        }
        let hidden = rename_within_parent(self, &format!("{}{}", HIDDEN_PREFIX, name))?;
        log_status!("files", "Hid {} as {}", self.display(), hidden.display());
        Ok(hidden)
    }

    fn show(&self) -> Result<PathBuf> {
        validation::require_existing(self)?;
        let name = file_name(self)?;
        let visible = match name.strip_prefix(HIDDEN_PREFIX) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return Ok(self.to_path_buf()),
        };
        let shown = rename_within_parent(self, visible)?;
        log_status!("files", "Unhid {} as {}", self.display(), shown.display());
        Ok(shown)
    }

    fn copy_to(&self, destination: &Path, overwrite: bool) -> Result<()> {
        validation::require_existing(self)?;
        require_destination(self, destination, overwrite)?;
        fs::copy(self, destination).map_err(|e| io::map_io_error(e, self, "copy file"))?;
        log_status!("files", "Copied {} to {}", self.display(), destination.display());
        Ok(())
    }

    fn move_to(&self, destination: &Path, overwrite: bool) -> Result<()> {
        validation::require_existing(self)?;
        require_destination(self, destination, overwrite)?;
        match fs::rename(self, destination) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
                fs::copy(self, destination).map_err(|e| io::map_io_error(e, self, "move file"))?;
                fs::remove_file(self).map_err(|e| io::map_io_error(e, self, "move file"))?;
            }
            Err(e) => return Err(io::map_io_error(e, self, "move file")),
        }
        log_status!("files", "Moved {} to {}", self.display(), destination.display());
        Ok(())
    }

    fn created_at(&self) -> Result<DateTime<Local>> {
        validation::require_existing(self)?;
        fs::metadata(self)
            .and_then(|meta| meta.created())
            .map(DateTime::<Local>::from)
            .map_err(|e| io::map_io_error(e, self, "read creation time"))
    }

    fn size_in_kb(&self) -> Result<f64> {
        Ok(file_len(self)? as f64 / 1000.0)
    }

    fn size_in_mb(&self) -> Result<f64> {
        Ok(file_len(self)? as f64 / 1_000_000.0)
    }

    fn read_text(&self) -> Result<String> {
        validation::require_existing(self)?;
        io::read_file(self, "read text file")
    }

    fn write_text(&self, content: &str) -> Result<()> {
        validation::require_path(self)?;
        validation::require_non_empty(content, "content", "Cannot write empty content")?;
        io::write_file(self, content, "write text file")?;
        log_status!("files", "Wrote {}", self.display());
        Ok(())
    }

    fn append_text(&self, content: &str) -> Result<()> {
        validation::require_path(self)?;
        io::write_file_mode(self, content, true, "append text file")
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        validation::require_existing(self)?;
        io::read_file_bytes(self, "read file bytes")
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        validation::require_path(self)?;
        io::write_file(self, bytes, "write file bytes")?;
        log_status!("files", "Wrote {} bytes to {}", bytes.len(), self.display());
        Ok(())
    }
}

#[cfg(feature = "async")]
mod non_blocking {
    use super::*;

    pub async fn read_text_async(path: &Path) -> Result<String> {
        validation::require_existing(path)?;
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| io::map_io_error(e, path, "read text file"))
    }

    pub async fn write_text_async(path: &Path, content: &str) -> Result<()> {
        validation::require_path(path)?;
        validation::require_non_empty(content, "content", "Cannot write empty content")?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| io::map_io_error(e, path, "write text file"))
    }

    pub async fn read_bytes_async(path: &Path) -> Result<Vec<u8>> {
        validation::require_existing(path)?;
        tokio::fs::read(path)
            .await
            .map_err(|e| io::map_io_error(e, path, "read file bytes"))
    }

    pub async fn write_bytes_async(path: &Path, bytes: &[u8]) -> Result<()> {
        validation::require_path(path)?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| io::map_io_error(e, path, "write file bytes"))
    }
}

#[cfg(feature = "async")]
pub use non_blocking::*;
