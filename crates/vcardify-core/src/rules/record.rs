use crate::domain::{Contact, ContactDetails};
use crate::error::CoreError;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Logical columns a source row can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
    Organization,
    Title,
    Address,
    Notes,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Organization,
        Field::Title,
        Field::Address,
        Field::Notes,
    ];

    /// Accepted header spellings, already lowercased.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name"],
            Field::Phone => &["phone"],
            Field::Email => &["email"],
            Field::Organization => &["organization", "org"],
            Field::Title => &["title"],
            Field::Address => &["address"],
            Field::Notes => &["notes", "note"],
        }
    }

    pub fn from_header(header: &str) -> Option<Field> {
        let key = header.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&key.as_str()))
    }
}

/// One source row as `(column, value)` pairs in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn value_at(&self, position: usize) -> Option<&str> {
        self.columns.get(position).map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

/// Serialized as an object keyed by column. A repeated column keeps the
/// position of its first occurrence and the value of its last one.
impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&str, &str)> = Vec::with_capacity(self.columns.len());
        for (column, value) in self.columns() {
            match entries.iter_mut().find(|(name, _)| *name == column) {
                Some(entry) => entry.1 = value,
                None => entries.push((column, value)),
            }
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (column, value) in entries {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Maps each [`Field`] to the position of the first header that spells it.
///
/// Build it once per file when every row shares the same header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndex {
    positions: HashMap<Field, usize>,
}

impl FieldIndex {
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (position, header) in headers.into_iter().enumerate() {
            if let Some(field) = Field::from_header(header) {
                positions.entry(field).or_insert(position);
            }
        }
        Self { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.positions.contains_key(&field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("missing required fields")]
    MissingRequiredFields,
    #[error("phone number too short: {0}")]
    PhoneTooShort(String),
    #[error("invalid contact: {0}")]
    InvalidContact(String),
    #[error("unparseable row: {0}")]
    Unparseable(String),
}

impl From<CoreError> for RejectionReason {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyName => RejectionReason::MissingRequiredFields,
            CoreError::PhoneTooShort(raw) => RejectionReason::PhoneTooShort(raw),
            other => RejectionReason::InvalidContact(other.to_string()),
        }
    }
}

/// A row that did not make it into the output, kept for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub data: RawRow,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RejectionReason,
}

fn serialize_reason<S: Serializer>(reason: &RejectionReason, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Validates a standalone row, resolving its headers on the fly.
pub fn validate(row: &RawRow, country_code: &str) -> Result<Contact, RejectionReason> {
    let index = FieldIndex::from_headers(row.columns().map(|(column, _)| column));
    validate_with(&index, row, country_code)
}

/// Validates a row whose headers were already resolved into `index`.
pub fn validate_with(
    index: &FieldIndex,
    row: &RawRow,
    country_code: &str,
) -> Result<Contact, RejectionReason> {
    let lookup = |field: Field| {
        index
            .position(field)
            .and_then(|position| row.value_at(position))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let (Some(name), Some(phone)) = (lookup(Field::Name), lookup(Field::Phone)) else {
        return Err(RejectionReason::MissingRequiredFields);
    };

    let details = ContactDetails {
        email: lookup(Field::Email).map(str::to_string),
        organization: lookup(Field::Organization).map(str::to_string),
        title: lookup(Field::Title).map(str::to_string),
        address: lookup(Field::Address).map(str::to_string),
        notes: lookup(Field::Notes).map(str::to_string),
    };

    Contact::new(name, phone, country_code, details).map_err(RejectionReason::from)
}
