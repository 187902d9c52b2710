use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

/// Returns the trimmed address when it looks like `local@domain.tld`.
///
/// Malformed input yields `None` instead of an error so a bad email never
/// costs the whole contact.
pub fn validate_email(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if EMAIL_PATTERN.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}
