pub mod backup;
pub mod error;
pub mod output;
pub mod paths;
pub mod report;

pub use backup::backup_existing;
pub use error::{Result, StoreError};
pub use output::write_output;
pub use report::write_rejection_report;
