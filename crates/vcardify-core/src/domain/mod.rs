pub mod contact;
pub mod dialect;
pub mod email;
pub mod name;
pub mod phone;

pub use contact::{Contact, ContactDetails};
pub use dialect::VcardDialect;
pub use email::validate_email;
pub use name::{parse_name, ParsedName};
pub use phone::{normalize_phone, PhoneNumber, DEFAULT_COUNTRY_CODE};
