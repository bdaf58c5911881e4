//! The interactive numbered menu. Reads answers from any `BufRead` and writes
//! prompts to any `Write`, so a session can be scripted in tests.

use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::book::{ContactBook, Entry, ExportOutcome, Listing, Selection};
use crate::error::ContactError;
use crate::record::{Contact, ContactPatch};
use crate::store::Store;

pub struct Menu<'s, R, W> {
    book: ContactBook<'s>,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(store: &'s Store, input: R, output: W) -> Self {
        Self {
            book: ContactBook::new(store),
            input,
            output,
        }
    }

    /// Runs until the user picks Exit or the input ends. Operation errors are
    /// reported and the menu comes back; only failing to talk to the terminal
    /// ends the loop early.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            // ------------- OPTIONS --------------
            writeln!(self.output)?;
            writeln!(self.output, "Contact Book")?;
            writeln!(self.output, "1. Add contact")?;
            writeln!(self.output, "2. View contacts")?;
            writeln!(self.output, "3. Search contacts")?;
            writeln!(self.output, "4. Update contact")?;
            writeln!(self.output, "5. Delete contact")?;
            writeln!(self.output, "6. Export contacts")?;
            writeln!(self.output, "7. Exit")?;
            // ------------------------------------

            let entered = match self.prompt("Choose an option: ")? {
                Some(entered) => entered,
                None => break,
            };
            let entered: u8 = match entered.trim().parse() {
                Ok(num) => num,
                Err(_) => {
                    writeln!(self.output, "Invalid option, please enter a number from 1 to 7.")?;
                    continue;
                }
            };
            match entered {
                1 => self.add()?,
                2 => self.view()?,
                3 => self.search()?,
                4 => self.update()?,
                5 => self.delete()?,
                6 => self.export()?,
                7 => break,
                _ => writeln!(self.output, "Invalid option, please enter a number from 1 to 7.")?,
            }
        }
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn add(&mut self) -> io::Result<()> {
        let name = self.answer("Name: ")?;
        let phone = self.answer("Phone: ")?;
        let email = self.answer("Email: ")?;
        match self.book.add(Contact::new(name, phone, email)) {
            Ok(_) => writeln!(self.output, "Contact added."),
            Err(e) => self.report(e),
        }
    }

    fn view(&mut self) -> io::Result<()> {
        match self.book.list() {
            Ok(Listing::Empty) => writeln!(self.output, "No contacts found."),
            Ok(Listing::Contacts(entries)) => self.show(&entries),
            Err(e) => self.report(e),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let term = self.answer("Search by name: ")?;
        match self.book.search(term.trim()) {
            Ok(found) if found.is_empty() => writeln!(self.output, "No matching contacts found."),
            Ok(found) => self.show(&found),
            Err(e) => self.report(e),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        let Some(selection) = self.choose("update")? else {
            return Ok(());
        };
        writeln!(self.output, "Leave a field blank to keep its current value.")?;
        let name = self.answer("New name: ")?;
        let phone = self.answer("New phone: ")?;
        let email = self.answer("New email: ")?;
        let patch = ContactPatch::from_input(&name, &phone, &email);
        match self.book.update(&selection, &patch) {
            Ok(contact) => writeln!(self.output, "Contact updated: {}", contact),
            Err(e) => self.report(e),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(selection) = self.choose("delete")? else {
            return Ok(());
        };
        match self.book.delete(&selection) {
            Ok(contact) => writeln!(self.output, "Deleted {}.", contact.name),
            Err(e) => self.report(e),
        }
    }

    fn export(&mut self) -> io::Result<()> {
        let target = self.answer("Export to file: ")?;
        let target = target.trim();
        if target.is_empty() {
            return writeln!(self.output, "No file name given.");
        }
        match self.book.export(target) {
            Ok(ExportOutcome::NothingToExport) => writeln!(self.output, "No contacts to export."),
            Ok(ExportOutcome::Exported { path, count }) => {
                writeln!(self.output, "Exported {} contacts to {}.", count, path.display())
            }
            Err(e) => self.report(e),
        }
    }

    /// Shows the current contacts and asks which one to act on. Returns the
    /// raw answer once it names an existing position.
    fn choose(&mut self, verb: &str) -> io::Result<Option<String>> {
        let entries = match self.book.list() {
            Ok(Listing::Empty) => {
                writeln!(self.output, "No contacts to {}.", verb)?;
                return Ok(None);
            }
            Ok(Listing::Contacts(entries)) => entries,
            Err(e) => {
                self.report(e)?;
                return Ok(None);
            }
        };
        self.show(&entries)?;
        let selection = self.answer(&format!("Number of the contact to {}: ", verb))?;
        let checked = Selection::parse(&selection)
            .and_then(|position| Selection::resolve(position, entries.len()));
        match checked {
            Ok(_) => Ok(Some(selection)),
            Err(e) => {
                self.report(e)?;
                Ok(None)
            }
        }
    }

    fn show(&mut self, entries: &[Entry]) -> io::Result<()> {
        for entry in entries {
            writeln!(self.output, "{}. {}", entry.position, entry.contact)?;
        }
        Ok(())
    }

    fn report(&mut self, e: ContactError) -> io::Result<()> {
        if !e.is_user_error() {
            warn!(error = %e, "operation failed");
        }
        writeln!(self.output, "Error: {}", e)
    }

    /// Like `prompt`, but treats end of input as a blank answer.
    fn answer(&mut self, question: &str) -> io::Result<String> {
        Ok(self.prompt(question)?.unwrap_or_default())
    }

    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut entered = String::new();
        if self.input.read_line(&mut entered)? == 0 {
            return Ok(None);
        }
        let trimmed = entered.trim_end_matches(['\n', '\r']).len();
        entered.truncate(trimmed);
        Ok(Some(entered))
    }
}
