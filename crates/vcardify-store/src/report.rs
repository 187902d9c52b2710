use crate::error::{Result, StoreError};
use crate::paths;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use vcardify_core::RejectedRow;

/// Writes the rejected rows as a pretty JSON array into `dir`.
///
/// Nothing is written, and `None` returned, when no row was rejected.
pub fn write_rejection_report(
    dir: &Path,
    rejected: &[RejectedRow],
    now: NaiveDateTime,
) -> Result<Option<PathBuf>> {
    if rejected.is_empty() {
        return Ok(None);
    }

    paths::ensure_dir(dir)?;
    let path = paths::report_path(dir, now);
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rejected).map_err(|source| StoreError::Json {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(write_err)?;

    info!(path = %path.display(), rows = rejected.len(), "rejection report written");
    Ok(Some(path))
}
