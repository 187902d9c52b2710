use vcardify_core::{Contact, VcardDialect};

const CARD_SEPARATOR: &str = "\n";

/// Renders every contact and joins the cards with a single line break.
pub fn render_cards(contacts: &[Contact], dialect: VcardDialect, name_suffix: &str) -> String {
    contacts
        .iter()
        .map(|contact| render_card(contact, dialect, name_suffix))
        .collect::<Vec<_>>()
        .join(CARD_SEPARATOR)
}

/// Renders one contact as a card ending in `END:VCARD` without a trailing
/// line break. `name_suffix` is appended verbatim to the displayed name.
pub fn render_card(contact: &Contact, dialect: VcardDialect, name_suffix: &str) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCARD\n");
    push_line(&mut out, "VERSION", dialect.version());

    match dialect {
        VcardDialect::Legacy => {
            let display = format!("{}{}", escape_line_breaks(contact.name()), name_suffix);
            push_line(&mut out, "N", &format!(";{display};;;"));
            push_line(&mut out, "FN", &display);
            push_line(&mut out, "TEL;CELL;PREF", contact.phone());
        }
        VcardDialect::Modern => {
            let name = contact.parsed_name();
            push_line(
                &mut out,
                "N",
                &format!(
                    "{};{};;;",
                    escape_line_breaks(&name.last),
                    escape_line_breaks(&name.first)
                ),
            );
            push_line(
                &mut out,
                "FN",
                &format!("{}{}", escape_line_breaks(&name.full), name_suffix),
            );
            push_line(&mut out, "TEL;TYPE=CELL", contact.phone());
        }
    }

    let typed = dialect == VcardDialect::Modern;
    if let Some(email) = contact.email() {
        let key = if typed { "EMAIL;TYPE=INTERNET" } else { "EMAIL" };
        push_line(&mut out, key, email);
    }
    if let Some(organization) = contact.organization() {
        push_line(&mut out, "ORG", &escape_line_breaks(organization));
    }
    if let Some(title) = contact.title() {
        push_line(&mut out, "TITLE", &escape_line_breaks(title));
    }
    if let Some(address) = contact.address() {
        let key = if typed { "ADR;TYPE=HOME" } else { "ADR" };
        push_line(
            &mut out,
            key,
            &format!(";;{};;;;", escape_line_breaks(address)),
        );
    }
    if let Some(notes) = contact.notes() {
        push_line(&mut out, "NOTE", &escape_line_breaks(notes));
    }

    out.push_str("END:VCARD");
    out
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push(':');
    out.push_str(value);
    out.push('\n');
}

/// Keeps a value on one content line by writing embedded line breaks as `\n`.
fn escape_line_breaks(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcardify_core::{ContactDetails, DEFAULT_COUNTRY_CODE};

    fn contact(name: &str, details: ContactDetails) -> Contact {
        Contact::new(name, "9876543210", DEFAULT_COUNTRY_CODE, details).expect("contact")
    }

    fn full_details() -> ContactDetails {
        ContactDetails {
            email: Some("jane@example.com".to_string()),
            organization: Some("Acme".to_string()),
            title: Some("Engineer".to_string()),
            address: Some("12 Main St".to_string()),
            notes: Some("met at conf".to_string()),
        }
    }

    fn property<'a>(card: &'a str, key: &str) -> Option<&'a str> {
        card.lines().find_map(|line| {
            let (left, value) = line.split_once(':')?;
            let name = left.split(';').next()?;
            (name == key).then_some(value)
        })
    }

    #[test]
    fn modern_card_with_required_fields_only() {
        let card = render_card(
            &contact("John Smith", ContactDetails::default()),
            VcardDialect::Modern,
            "",
        );
        assert_eq!(
            card,
            "BEGIN:VCARD\nVERSION:3.0\nN:Smith;John;;;\nFN:John Smith\nTEL;TYPE=CELL:+91 9876 5432 10\nEND:VCARD"
        );
    }

    #[test]
    fn modern_card_with_every_optional_field() {
        let card = render_card(
            &contact("Jane Mary Doe", full_details()),
            VcardDialect::Modern,
            " (Work)",
        );
        assert_eq!(
            card,
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             N:Mary Doe;Jane;;;\n\
             FN:Jane Mary Doe (Work)\n\
             TEL;TYPE=CELL:+91 9876 5432 10\n\
             EMAIL;TYPE=INTERNET:jane@example.com\n\
             ORG:Acme\n\
             TITLE:Engineer\n\
             ADR;TYPE=HOME:;;12 Main St;;;;\n\
             NOTE:met at conf\n\
             END:VCARD"
        );
    }

    #[test]
    fn legacy_card_repeats_display_name() {
        let card = render_card(
            &contact("Jane Mary Doe", full_details()),
            VcardDialect::Legacy,
            " (Work)",
        );
        assert_eq!(
            card,
            "BEGIN:VCARD\n\
             VERSION:2.1\n\
             N:;Jane Mary Doe (Work);;;\n\
             FN:Jane Mary Doe (Work)\n\
             TEL;CELL;PREF:+91 9876 5432 10\n\
             EMAIL:jane@example.com\n\
             ORG:Acme\n\
             TITLE:Engineer\n\
             ADR:;;12 Main St;;;;\n\
             NOTE:met at conf\n\
             END:VCARD"
        );
    }

    #[test]
    fn single_token_name_leaves_last_name_empty() {
        let card = render_card(
            &contact("Madonna", ContactDetails::default()),
            VcardDialect::Modern,
            "",
        );
        assert_eq!(property(&card, "N"), Some(";Madonna;;;"));
        assert_eq!(property(&card, "FN"), Some("Madonna"));
    }

    #[test]
    fn modern_card_round_trips_phone_and_name_split() {
        let original = contact("Grace Brewster Hopper", ContactDetails::default());
        let card = render_card(&original, VcardDialect::Modern, "");

        assert_eq!(property(&card, "TEL"), Some(original.phone()));
        let mut parts = property(&card, "N").expect("N line").split(';');
        let last = parts.next().expect("last name");
        let first = parts.next().expect("first name");
        let parsed = original.parsed_name();
        assert_eq!(first, parsed.first);
        assert_eq!(last, parsed.last);
    }

    #[test]
    fn multiline_values_stay_on_one_line() {
        let card = render_card(
            &contact(
                "Ada",
                ContactDetails {
                    notes: Some("line one\r\nline two\nline three".to_string()),
                    ..ContactDetails::default()
                },
            ),
            VcardDialect::Modern,
            "",
        );
        assert_eq!(
            property(&card, "NOTE"),
            Some("line one\\nline two\\nline three")
        );
        assert_eq!(card.lines().count(), 7);
    }

    #[test]
    fn render_cards_joins_with_single_line_break() {
        let contacts = vec![
            contact("Ada Lovelace", ContactDetails::default()),
            contact("Grace Hopper", ContactDetails::default()),
        ];
        let output = render_cards(&contacts, VcardDialect::Modern, "");
        assert!(output.contains("END:VCARD\nBEGIN:VCARD"));
        assert!(!output.ends_with('\n'));
        assert_eq!(output.matches("BEGIN:VCARD").count(), 2);
    }
}
