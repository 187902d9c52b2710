use crate::error::{Result, StoreError};
use crate::paths;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Copies an existing file at `path` to a timestamped sibling before it gets
/// overwritten. Returns `None` when there is nothing to back up.
pub fn backup_existing(path: &Path, now: NaiveDateTime) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let target = paths::backup_path(path, now)?;
    fs::copy(path, &target).map_err(|source| StoreError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    info!(source = %path.display(), backup = %target.display(), "backup created");
    Ok(Some(target))
}
