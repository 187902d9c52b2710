pub mod convert;
pub mod error;
pub mod reader;
pub mod vcf;

pub use convert::{ConversionSummary, ConvertOptions, Converter, NoopReporter, Reporter};
pub use error::{Result, SyncError};
