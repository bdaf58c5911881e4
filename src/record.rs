use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names, in the order they appear on disk.
pub const HEADER: [&str; 3] = ["Name", "Phone", "Email"];

// ------------- Contact -------------
/// One entry in the contact file. Field order is column order, so it must
/// not change without changing [`HEADER`] as well.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
    /// Overwrites the fields the patch carries and keeps the rest.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
    }
    pub fn matches_name(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name: {}, Phone: {}, Email: {}", self.name, self.phone, self.email)
    }
}

// ------------- ContactPatch -------------
/// A sparse update. `None` means "keep what is there", never "clear it".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactPatch {
    /// Builds a patch from raw prompt answers, where a blank answer retains the
    /// existing value. Non-blank answers are kept exactly as typed.
    pub fn from_input(name: &str, phone: &str, email: &str) -> Self {
        Self {
            name: non_blank(name),
            phone: non_blank(phone),
            email: non_blank(email),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

fn non_blank(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_retain_existing_values() {
        let mut contact = Contact::new("A", "1", "a@x");
        contact.apply(&ContactPatch::from_input("", "2", "   "));
        assert_eq!(contact, Contact::new("A", "2", "a@x"));
    }

    #[test]
    fn all_blank_patch_is_empty() {
        assert!(ContactPatch::from_input("", " ", "\t").is_empty());
        assert!(!ContactPatch::from_input("", "", "b@y").is_empty());
    }

    #[test]
    fn name_match_ignores_case() {
        let contact = Contact::new("Alice", "555", "a@x");
        assert!(contact.matches_name("ali"));
        assert!(!contact.matches_name("bob"));
    }
}
