use crate::error::CoreError;

pub const DEFAULT_COUNTRY_CODE: &str = "+91";

const LOCAL_NUMBER_DIGITS: usize = 10;
const GROUP_SIZE: usize = 4;

/// A phone number that already went through [`normalize_phone`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: &str, country_code: &str) -> Result<Self, CoreError> {
        let normalized = normalize_phone(raw, country_code)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strips formatting from `raw`, prefixes a country code and regroups the
/// result into blocks of four characters for display.
///
/// Ten digits are treated as a local number and get `country_code`; longer
/// numbers are assumed to carry their own country code and only get a `+`.
/// The regrouping runs over the whole prefixed string, so the blocks do not
/// line up with the country code boundary.
pub fn normalize_phone(raw: &str, country_code: &str) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.len() < LOCAL_NUMBER_DIGITS {
        return Err(CoreError::PhoneTooShort(raw.to_string()));
    }

    let prefixed = if digits.len() == LOCAL_NUMBER_DIGITS {
        format!("{country_code} {digits}")
    } else {
        format!("+{digits}")
    };

    Ok(group_for_display(&prefixed))
}

fn group_for_display(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let grouped = chars
        .chunks(GROUP_SIZE)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    // a block that ends on the prefix separator would otherwise leave a double space
    grouped.split_whitespace().collect::<Vec<_>>().join(" ")
}
