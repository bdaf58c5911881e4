//! Contactbook – a small single-user contact manager backed by a flat file.
//!
//! Contacts are name, phone and email triples kept in one comma separated
//! file whose first line is always `Name,Phone,Email`. There is no cache and
//! no index: every operation loads the whole file, works on the in-memory
//! copy and, when it changes something, writes the whole file back.
//!
//! ## Modules
//! * [`record`] – The [`record::Contact`] row and the sparse
//!   [`record::ContactPatch`] used for updates.
//! * [`store`] – Load-all / save-all against the backing file. Saves go
//!   through a temp file and a rename, so a crash mid-write leaves the
//!   previous file intact.
//! * [`book`] – Add, list, search, update, delete and export, both as pure
//!   functions over a `Vec<Contact>` and as transactions through
//!   [`book::ContactBook`].
//! * [`settings`] – Where the file lives, read with the `config` crate.
//! * [`menu`] – The interactive numbered menu the binary runs.
//!
//! ## Quick Start
//! ```
//! use contactbook::{book::ContactBook, record::Contact, store::Store};
//! let dir = tempfile::tempdir().unwrap();
//! let store = Store::new(dir.path().join("contacts.csv"));
//! store.ensure_initialized().unwrap();
//! let book = ContactBook::new(&store);
//! book.add(Contact::new("Alice", "555-0100", "alice@example.com")).unwrap();
//! assert_eq!(book.search("ali").unwrap().len(), 1);
//! ```
//!
//! ## Positions
//! Contacts are addressed by their 1-based position in the file. There are no
//! stable identifiers, so deleting a contact moves everyone after it up by one.
//!
//! ## Concurrency
//! One process, one writer. Nothing locks the file; two sessions saving at
//! the same time will overwrite each other.
//!
//! ## License
//! Dual licensed under Apache-2.0 and MIT.

pub mod book;
pub mod error;
pub mod menu;
pub mod record;
pub mod settings;
pub mod store;
