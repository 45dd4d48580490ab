//! Writing datasets to disk.
//!
//! Every writer truncates the target file, so re-running a pull replaces the
//! previous dataset instead of appending to it.

use crate::error::AppError;
use crate::table::Table;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Creates `dir` and its parents if they don't exist.
pub async fn ensure_directory(dir: &Path) -> Result<(), AppError> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        debug!("Creating directory {}", dir.display());
        fs::create_dir_all(dir).await?;
    }
    Ok(())
}

async fn write_bytes(path: &Path, contents: &[u8]) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).await?;
    }
    fs::write(path, contents).await?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path.to_path_buf())
}

/// Writes `table` as CSV with a header row.
pub async fn write_csv(table: &Table, path: &Path) -> Result<PathBuf, AppError> {
    let mut buffer = Vec::new();
    table.write_csv(&mut buffer)?;
    write_bytes(path, &buffer).await
}

/// Writes `table` as a compact JSON array of row objects.
pub async fn write_json(table: &Table, path: &Path) -> Result<PathBuf, AppError> {
    let contents = serde_json::to_vec(&table.to_json_records())?;
    write_bytes(path, &contents).await
}

/// Writes any JSON value with four-space indentation. Non-ASCII text is
/// written as-is.
pub async fn write_pretty_json(value: &Value, path: &Path) -> Result<PathBuf, AppError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    write_bytes(path, &buffer).await
}
