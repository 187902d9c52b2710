use crate::error::{Result, SyncError};
use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use vcardify_core::{validate_with, Contact, Field, FieldIndex, RawRow, RejectedRow, RejectionReason};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Row 1 is the header line, so the first record is spreadsheet row 2.
pub const FIRST_DATA_ROW: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub headers: Vec<String>,
    pub contacts: Vec<Contact>,
    pub rejected: Vec<RejectedRow>,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.contacts.len() + self.rejected.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// Reads the whole file at `path` and validates every row.
pub fn read_source(path: &Path, country_code: &str) -> Result<BatchOutcome> {
    let data = read_bytes(path)?;
    read_contacts(&data, country_code).map_err(|err| SyncError::SourceUnreadable {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Validates every record of a header-labelled CSV document.
///
/// Only failures that make the whole document unreadable are returned as
/// errors; a bad record ends up in [`BatchOutcome::rejected`].
pub fn read_contacts(data: &[u8], country_code: &str) -> std::result::Result<BatchOutcome, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(strip_bom(data));

    let headers = decode_fields(reader.byte_headers()?);
    info!(headers = ?headers, "csv headers found");

    let index = FieldIndex::from_headers(headers.iter().map(String::as_str));
    for field in [Field::Name, Field::Phone] {
        if !index.contains(field) {
            warn!(field = ?field, "required column missing; every row will be rejected");
        }
    }

    let mut outcome = BatchOutcome {
        headers,
        ..BatchOutcome::default()
    };

    for (offset, result) in reader.byte_records().enumerate() {
        let row_number = offset + FIRST_DATA_ROW;
        let record = result?;
        let row = to_raw_row(&outcome.headers, &record);

        if let Some(err) = record.iter().find_map(|field| std::str::from_utf8(field).err()) {
            warn!(row = row_number, error = %err, "skipping unparseable row");
            outcome.rejected.push(RejectedRow {
                row_number,
                data: row,
                reason: RejectionReason::Unparseable(format!("invalid utf-8: {err}")),
            });
            continue;
        }

        match validate_with(&index, &row, country_code) {
            Ok(contact) => {
                warn_on_dropped_email(&index, &row, &contact, row_number);
                debug!(row = row_number, name = contact.name(), "row accepted");
                outcome.contacts.push(contact);
            }
            Err(reason) => {
                debug!(row = row_number, reason = %reason, "row rejected");
                outcome.rejected.push(RejectedRow {
                    row_number,
                    data: row,
                    reason,
                });
            }
        }
    }

    info!(
        processed = outcome.processed(),
        valid = outcome.contacts.len(),
        invalid = outcome.rejected.len(),
        "csv processed"
    );
    Ok(outcome)
}

/// Header line, row count and the first `limit` records of the file.
pub fn preview_source(path: &Path, limit: usize) -> Result<CsvPreview> {
    let data = read_bytes(path)?;
    preview_contacts(&data, limit).map_err(|err| SyncError::SourceUnreadable {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn preview_contacts(data: &[u8], limit: usize) -> std::result::Result<CsvPreview, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(strip_bom(data));
    let headers = decode_fields(reader.byte_headers()?);

    let mut rows = Vec::new();
    let mut total_rows = 0;
    for result in reader.byte_records() {
        let record = result?;
        if rows.len() < limit {
            rows.push(decode_fields(&record));
        }
        total_rows += 1;
    }

    Ok(CsvPreview {
        headers,
        rows,
        total_rows,
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(SyncError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read(path).map_err(|err| SyncError::SourceUnreadable {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Undecodable bytes become U+FFFD so the text stays printable.
fn decode_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

fn to_raw_row(headers: &[String], record: &ByteRecord) -> RawRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| (header.as_str(), String::from_utf8_lossy(value)))
        .collect()
}

fn warn_on_dropped_email(index: &FieldIndex, row: &RawRow, contact: &Contact, row_number: usize) {
    if contact.email().is_some() {
        return;
    }
    let raw = index
        .position(Field::Email)
        .and_then(|position| row.value_at(position))
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(raw) = raw {
        warn!(row = row_number, email = raw, "invalid email format; dropping field");
    }
}
