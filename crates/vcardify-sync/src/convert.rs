use crate::error::{Result, SyncError};
use crate::reader;
use crate::vcf;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use vcardify_core::{ContactStats, RejectedRow, VcardDialect, DEFAULT_COUNTRY_CODE};
use vcardify_store::{backup_existing, paths, write_output, write_rejection_report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub country_code: String,
    pub dialect: VcardDialect,
    pub name_suffix: String,
    pub output_dir: PathBuf,
    pub backup: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            dialect: VcardDialect::default(),
            name_suffix: String::new(),
            output_dir: PathBuf::from("output"),
            backup: true,
        }
    }
}

/// Progress notifications for a single conversion run.
pub trait Reporter {
    fn headers(&mut self, _headers: &[String]) {}
    fn rejected(&mut self, _row: &RejectedRow) {}
    fn backup_created(&mut self, _path: &Path) {}
}

pub struct NoopReporter;

impl Reporter for NoopReporter {}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dialect: VcardDialect,
    pub name_suffix: String,
    pub processed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub stats: ContactStats,
    pub backup: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Converts the CSV file at `input` into a vCard file.
    ///
    /// Without `output` the cards go to a timestamped file inside the
    /// configured output directory. Nothing on disk is touched until the
    /// input has produced at least one valid contact.
    pub fn convert(
        &self,
        input: &Path,
        output: Option<&Path>,
        now: NaiveDateTime,
        reporter: &mut dyn Reporter,
    ) -> Result<ConversionSummary> {
        let input = resolve_input(input)?;
        info!(path = %input.display(), "reading contacts");

        let outcome = reader::read_source(&input, &self.options.country_code)?;
        reporter.headers(&outcome.headers);
        for row in &outcome.rejected {
            info!(row = row.row_number, reason = %row.reason, "invalid contact");
            reporter.rejected(row);
        }

        if outcome.contacts.is_empty() {
            return Err(SyncError::EmptyResult {
                path: input,
                rejected: outcome.rejected.len(),
            });
        }

        let stats = ContactStats::from_contacts(&outcome.contacts);
        let data = vcf::render_cards(
            &outcome.contacts,
            self.options.dialect,
            &self.options.name_suffix,
        );

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => paths::default_output_path(&self.options.output_dir, now),
        };

        let backup = if self.options.backup {
            backup_existing(&output, now)?
        } else {
            None
        };
        if let Some(path) = &backup {
            reporter.backup_created(path);
        }

        write_output(&output, &data)?;
        let report = write_rejection_report(&self.options.output_dir, &outcome.rejected, now)?;

        info!(
            output = %output.display(),
            contacts = outcome.contacts.len(),
            version = %self.options.dialect,
            "vcard file created"
        );

        Ok(ConversionSummary {
            processed: outcome.processed(),
            valid: outcome.contacts.len(),
            invalid: outcome.rejected.len(),
            input,
            output,
            dialect: self.options.dialect,
            name_suffix: self.options.name_suffix.clone(),
            stats,
            backup,
            report,
        })
    }
}

fn resolve_input(input: &Path) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(SyncError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    fs::canonicalize(input).map_err(|err| SyncError::SourceUnreadable {
        path: input.to_path_buf(),
        message: err.to_string(),
    })
}
