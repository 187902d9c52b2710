use crate::domain::Contact;
use serde::Serialize;

/// How many contacts carry each optional attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub with_email: usize,
    pub with_organization: usize,
    pub with_title: usize,
    pub with_address: usize,
    pub with_notes: usize,
}

impl ContactStats {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let count = |has: fn(&Contact) -> bool| contacts.iter().filter(|c| has(c)).count();
        Self {
            total: contacts.len(),
            with_email: count(|c| c.email().is_some()),
            with_organization: count(|c| c.organization().is_some()),
            with_title: count(|c| c.title().is_some()),
            with_address: count(|c| c.address().is_some()),
            with_notes: count(|c| c.notes().is_some()),
        }
    }

    pub fn rows(&self) -> [(&'static str, usize); 5] {
        [
            ("With email", self.with_email),
            ("With organization", self.with_organization),
            ("With title", self.with_title),
            ("With address", self.with_address),
            ("With notes", self.with_notes),
        ]
    }

    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.total as f64
    }
}
