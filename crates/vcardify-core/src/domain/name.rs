#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub first: String,
    pub last: String,
    pub full: String,
}

/// Splits a display name on whitespace: the first token is the first name,
/// everything after it is the last name. `full` keeps the trimmed input as
/// typed, including its inner spacing.
pub fn parse_name(raw: &str) -> ParsedName {
    let trimmed = raw.trim();
    let mut tokens = trimmed.split_whitespace();
    let Some(first) = tokens.next() else {
        return ParsedName::default();
    };

    ParsedName {
        first: first.to_string(),
        last: tokens.collect::<Vec<_>>().join(" "),
        full: trimmed.to_string(),
    }
}
