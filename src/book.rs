//! Query and mutation operations over the contact set.
//!
//! The free functions work on an in-memory `Vec<Contact>` and never touch the
//! disk. [`ContactBook`] wraps them in a full load, mutate, save cycle against
//! a [`Store`], so each call is one durable change. Positions handed in by
//! callers are 1-based; nothing is saved when a position does not resolve.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ContactError, Result};
use crate::record::{Contact, ContactPatch};
use crate::store::{self, Store};

/// Extension given to export targets that lack it.
pub const EXPORT_EXTENSION: &str = "csv";

// ------------- Entry / Listing -------------
/// A contact together with the 1-based position it currently has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub position: usize,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Contacts(Vec<Entry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    NothingToExport,
    Exported { path: PathBuf, count: usize },
}

// ------------- Selection -------------
pub struct Selection;

impl Selection {
    /// Parses what the user typed as a 1-based position.
    pub fn parse(input: &str) -> Result<usize> {
        let trimmed = input.trim();
        trimmed.parse::<usize>().map_err(|_| ContactError::Parse {
            message: format!("'{}' is not a number", trimmed),
        })
    }
    /// Turns a 1-based position into an index, provided it is in range.
    pub fn resolve(position: usize, len: usize) -> Result<usize> {
        if position == 0 || position > len {
            return Err(ContactError::InvalidSelection { position, len });
        }
        Ok(position - 1)
    }
}

// ------------- pure operations -------------
pub fn append(contacts: &mut Vec<Contact>, contact: Contact) {
    contacts.push(contact);
}

pub fn list(contacts: Vec<Contact>) -> Listing {
    if contacts.is_empty() {
        return Listing::Empty;
    }
    Listing::Contacts(numbered(contacts.into_iter().enumerate()))
}

/// Case-insensitive substring search on the name only. Matches keep their
/// original positions and order; an empty term matches everyone.
pub fn search(contacts: &[Contact], term: &str) -> Vec<Entry> {
    let needle = term.to_lowercase();
    numbered(
        contacts
            .iter()
            .enumerate()
            .filter(|(_, contact)| contact.matches_name(&needle))
            .map(|(index, contact)| (index, contact.clone())),
    )
}

pub fn update(contacts: &mut [Contact], position: usize, patch: &ContactPatch) -> Result<Contact> {
    let index = Selection::resolve(position, contacts.len())?;
    contacts[index].apply(patch);
    Ok(contacts[index].clone())
}

pub fn remove(contacts: &mut Vec<Contact>, position: usize) -> Result<Contact> {
    let index = Selection::resolve(position, contacts.len())?;
    Ok(contacts.remove(index))
}

/// Adds the export extension unless the target already carries it.
pub fn export_path(target: impl AsRef<Path>) -> PathBuf {
    let target = target.as_ref();
    let has_extension = target
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXPORT_EXTENSION));
    if has_extension {
        return target.to_path_buf();
    }
    let mut name = target.as_os_str().to_os_string();
    name.push(".");
    name.push(EXPORT_EXTENSION);
    PathBuf::from(name)
}

fn numbered(rows: impl Iterator<Item = (usize, Contact)>) -> Vec<Entry> {
    rows.map(|(index, contact)| Entry { position: index + 1, contact })
        .collect()
}

// ------------- ContactBook -------------
/// Runs each operation as its own read-modify-write transaction.
pub struct ContactBook<'s> {
    store: &'s Store,
}

impl<'s> ContactBook<'s> {
    pub fn new(store: &'s Store) -> Self {
        Self { store }
    }
    pub fn add(&self, contact: Contact) -> Result<usize> {
        let mut contacts = self.store.load()?;
        append(&mut contacts, contact);
        self.store.save(&contacts)?;
        info!(position = contacts.len(), "contact added");
        Ok(contacts.len())
    }
    pub fn list(&self) -> Result<Listing> {
        Ok(list(self.store.load()?))
    }
    pub fn search(&self, term: &str) -> Result<Vec<Entry>> {
        let contacts = self.store.load()?;
        let found = search(&contacts, term);
        debug!(term, hits = found.len(), "searched contacts");
        Ok(found)
    }
    /// `selection` is the raw 1-based position as typed. A patch with nothing
    /// in it still checks the selection but leaves the file as it is.
    pub fn update(&self, selection: &str, patch: &ContactPatch) -> Result<Contact> {
        let position = Selection::parse(selection)?;
        let mut contacts = self.store.load()?;
        let updated = update(&mut contacts, position, patch)?;
        if patch.is_empty() {
            debug!(position, "nothing to update");
            return Ok(updated);
        }
        self.store.save(&contacts)?;
        info!(position, "contact updated");
        Ok(updated)
    }
    pub fn delete(&self, selection: &str) -> Result<Contact> {
        let position = Selection::parse(selection)?;
        let mut contacts = self.store.load()?;
        let removed = remove(&mut contacts, position)?;
        self.store.save(&contacts)?;
        info!(position, "contact deleted");
        Ok(removed)
    }
    /// Writes the full current set to `target`, leaving the store's own file
    /// untouched. A target that resolves to the store's file is refused.
    pub fn export(&self, target: impl AsRef<Path>) -> Result<ExportOutcome> {
        let path = export_path(target);
        if self.store.is_backed_by(&path) {
            return Err(ContactError::ExportOverStore { path });
        }
        let contacts = self.store.load()?;
        if contacts.is_empty() {
            return Ok(ExportOutcome::NothingToExport);
        }
        store::write_to(&path, &contacts).map_err(|e| ContactError::Export {
            path: path.clone(),
            source: Box::new(e),
        })?;
        info!(path = %path.display(), count = contacts.len(), "contacts exported");
        Ok(ExportOutcome::Exported { path, count: contacts.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Contact> {
        vec![
            Contact::new("Alice", "1", "a@x"),
            Contact::new("Bob", "2", "ali@x"),
            Contact::new("Carol", "3", "c@x"),
        ]
    }

    #[test]
    fn selection_rejects_non_numbers() {
        assert!(matches!(Selection::parse("two"), Err(ContactError::Parse { .. })));
        assert!(matches!(Selection::parse("-1"), Err(ContactError::Parse { .. })));
        assert_eq!(Selection::parse(" 2 ").unwrap(), 2);
    }

    #[test]
    fn selection_bounds() {
        assert!(Selection::resolve(0, 3).is_err());
        assert!(Selection::resolve(4, 3).is_err());
        assert_eq!(Selection::resolve(3, 3).unwrap(), 2);
    }

    #[test]
    fn search_looks_at_names_only() {
        let found = search(&three(), "ALI");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, 1);
        assert_eq!(found[0].contact.name, "Alice");
    }

    #[test]
    fn search_keeps_original_positions() {
        let found = search(&three(), "o");
        let positions: Vec<usize> = found.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![2, 3]);
    }

    #[test]
    fn empty_term_matches_everyone() {
        let found = search(&three(), "");
        let positions: Vec<usize> = found.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn remove_shifts_later_positions_down() {
        let mut contacts = three();
        let removed = remove(&mut contacts, 2).unwrap();
        assert_eq!(removed.name, "Bob");
        assert_eq!(contacts[1].name, "Carol");
    }

    #[test]
    fn export_extension_is_appended_when_missing() {
        assert_eq!(export_path("backup"), PathBuf::from("backup.csv"));
        assert_eq!(export_path("backup.CSV"), PathBuf::from("backup.CSV"));
        assert_eq!(export_path("backup.txt"), PathBuf::from("backup.txt.csv"));
    }

    #[test]
    fn empty_list_is_signalled() {
        assert_eq!(list(Vec::new()), Listing::Empty);
        match list(three()) {
            Listing::Contacts(entries) => assert_eq!(entries.len(), 3),
            Listing::Empty => panic!("three contacts were listed as empty"),
        }
    }
}
