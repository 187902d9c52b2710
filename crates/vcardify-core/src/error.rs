use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("name is required")]
    EmptyName,
    #[error("phone number too short: {0}")]
    PhoneTooShort(String),
    #[error("invalid vCard version: {0}")]
    InvalidDialect(String),
}
