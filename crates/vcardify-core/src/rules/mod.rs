pub mod record;
pub mod stats;

pub use record::{validate, validate_with, Field, FieldIndex, RawRow, RejectedRow, RejectionReason};
pub use stats::ContactStats;
