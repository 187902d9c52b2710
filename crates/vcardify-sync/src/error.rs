use std::path::PathBuf;
use thiserror::Error;
use vcardify_store::StoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("cannot read {}: {message}", path.display())]
    SourceUnreadable { path: PathBuf, message: String },
    #[error("no valid contacts found in {} ({rejected} rows rejected)", path.display())]
    EmptyResult { path: PathBuf, rejected: usize },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
