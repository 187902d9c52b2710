use crate::error::{Result, StoreError};
use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const OUTPUT_PREFIX: &str = "contacts";
const OUTPUT_EXTENSION: &str = "vcf";
const REPORT_PREFIX: &str = "error_report";
const REPORT_EXTENSION: &str = "json";

pub fn timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `<dir>/contacts_<timestamp>.vcf`
pub fn default_output_path(dir: &Path, now: NaiveDateTime) -> PathBuf {
    dir.join(format!(
        "{OUTPUT_PREFIX}_{}.{OUTPUT_EXTENSION}",
        timestamp(now)
    ))
}

/// `<dir>/error_report_<timestamp>.json`, made unique within `dir`.
pub fn report_path(dir: &Path, now: NaiveDateTime) -> PathBuf {
    unique_path(dir.join(format!(
        "{REPORT_PREFIX}_{}.{REPORT_EXTENSION}",
        timestamp(now)
    )))
}

/// `<stem>_backup_<timestamp><.ext>` next to `path`, made unique.
pub fn backup_path(path: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| StoreError::InvalidOutputPath(path.to_path_buf()))?;
    let mut name = OsString::from(stem);
    name.push(format!("_backup_{}", timestamp(now)));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(unique_path(path.with_file_name(name)))
}

/// Returns `candidate` if nothing lives there yet, otherwise the first free
/// `<stem>_<n><.ext>` sibling.
pub fn unique_path(candidate: PathBuf) -> PathBuf {
    if !candidate.exists() {
        return candidate;
    }

    let stem = candidate
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    let ext = candidate.extension().map(OsString::from);
    let mut counter = 1usize;
    loop {
        let mut name = stem.clone();
        name.push(format!("_{counter}"));
        if let Some(ext) = &ext {
            name.push(".");
            name.push(ext);
        }
        let next = candidate.with_file_name(name);
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}
