use crate::domain::email::validate_email;
use crate::domain::name::{parse_name, ParsedName};
use crate::domain::phone::PhoneNumber;
use crate::error::CoreError;

/// Optional attributes as they arrive from a source row, before cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// A validated contact. The only way to get one is [`Contact::new`], so a
/// `Contact` always has a non-empty name and a normalized phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    phone: PhoneNumber,
    email: Option<String>,
    organization: Option<String>,
    title: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

impl Contact {
    pub fn new(
        name: &str,
        phone: &str,
        country_code: &str,
        details: ContactDetails,
    ) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyName);
        }
        let phone = PhoneNumber::new(phone, country_code)?;

        Ok(Self {
            name: name.to_string(),
            phone,
            email: validate_email(details.email.as_deref()),
            organization: non_blank(details.organization),
            title: non_blank(details.title),
            address: non_blank(details.address),
            notes: non_blank(details.notes),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parsed_name(&self) -> ParsedName {
        parse_name(&self.name)
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
