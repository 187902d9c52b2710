use crate::error::{Result, StoreError};
use crate::paths;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes `data` to `path`, creating parent directories and replacing any
/// previous content.
pub fn write_output(path: &Path, data: &str) -> Result<()> {
    if path.is_dir() {
        return Err(StoreError::InvalidOutputPath(path.to_path_buf()));
    }
    paths::ensure_parent_dir(path)?;
    fs::write(path, data).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "output written");
    Ok(())
}
