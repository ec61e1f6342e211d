//! Header-less CSV output for any `Serialize` type.
//!
//! Fields come from the type's own serde implementation, so the column list
//! is whatever the caller derives or writes by hand. Quoting follows RFC 4180;
//! rows end with `\n`.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::log_status;
use crate::utils::{io, validation};

fn csv_error(err: impl std::fmt::Display) -> Error {
    Error::internal_unexpected(format!("CSV serialization failed: {}", err))
}

fn render<T: Serialize>(records: &[T]) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

/// One record as a single CSV line, without the trailing newline.
pub fn to_csv_row<T: Serialize>(record: &T) -> Result<String> {
    let mut row = render(std::slice::from_ref(record))?;
    if row.ends_with('\n') {
        row.pop();
    }
    Ok(row)
}

/// Every record on its own line.
pub fn to_csv_string<T: Serialize>(records: &[T]) -> Result<String> {
    render(records)
}

/// Write (or append) the records to `path`.
pub fn write_csv<T: Serialize>(path: &Path, records: &[T], append: bool) -> Result<()> {
    validation::require_path(path)?;
    let content = render(records)?;
    io::write_file_mode(path, content, append, "write CSV")?;
    log_status!(
        "csv",
        "{} {} rows to {}",
        if append { "Appended" } else { "Wrote" },
        records.len(),
        path.display()
    );
    Ok(())
}

#[cfg(feature = "async")]
pub async fn write_csv_async<T: Serialize>(path: &Path, records: &[T], append: bool) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    validation::require_path(path)?;
    let content = render(records)?;
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .await
        .map_err(|e| io::map_io_error(e, path, "write CSV"))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| Error::internal_io(e.to_string(), Some("write CSV".to_string())))?;
    file.flush()
        .await
        .map_err(|e| Error::internal_io(e.to_string(), Some("flush CSV".to_string())))
}

pub trait CsvExt {
    fn to_csv_string(&self) -> Result<String>;
    fn write_csv(&self, path: &Path, append: bool) -> Result<()>;
}

impl<T: Serialize> CsvExt for [T] {
    fn to_csv_string(&self) -> Result<String> {
        to_csv_string(self)
    }

    fn write_csv(&self, path: &Path, append: bool) -> Result<()> {
        write_csv(path, self, append)
    }
}
