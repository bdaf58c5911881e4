// used for persistence
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ContactError, Result};
use crate::record::{Contact, HEADER};

/// Where the contact file lives unless configured otherwise.
pub const DEFAULT_STORE_PATH: &str = "contacts.csv";

// ------------- Store -------------
/// Owns load-all / save-all against one backing file. Nothing is cached;
/// every call goes to disk.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Reads every contact in file order. A missing file is an empty set and
    /// is not created. A row with the wrong number of columns fails the load.
    pub fn load(&self) -> Result<Vec<Contact>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no contact file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        match read_contacts(file) {
            Ok(contacts) => {
                debug!(path = %self.path.display(), count = contacts.len(), "loaded contacts");
                Ok(contacts)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "contact file could not be read");
                Err(e)
            }
        }
    }
    /// Replaces the whole file with the header followed by `contacts`.
    /// The rows go to a sibling temp file first, which is then renamed over
    /// the original, so a failed save leaves the previous file in place.
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        let tmp = temp_path(&self.path);
        let written = File::create(&tmp)
            .map_err(ContactError::from)
            .and_then(|file| write_contacts(file, contacts))
            .and_then(|file| file.sync_all().map_err(ContactError::from))
            .and_then(|_| fs::rename(&tmp, &self.path).map_err(ContactError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            warn!(path = %self.path.display(), error = %e, "saving contacts failed");
            return Err(e);
        }
        debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }
    /// Creates a header-only file if there is none. Existing files are left alone.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.save(&[])
    }
    /// True when `other` names the backing file, however it is spelled.
    /// Paths whose directory does not exist never match.
    pub fn is_backed_by(&self, other: &Path) -> bool {
        match (canonical(&self.path), canonical(other)) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

// the file itself may not exist yet, so only its directory is resolved
fn canonical(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(fs::canonicalize(parent).ok()?.join(name))
}

/// Writes `contacts` to `path` in the same format the store uses, truncating
/// whatever was there.
pub fn write_to(path: &Path, contacts: &[Contact]) -> Result<()> {
    let file = File::create(path)?;
    write_contacts(file, contacts)?;
    Ok(())
}

fn read_contacts<R: Read>(reader: R) -> Result<Vec<Contact>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    // a zero byte file has no header yet, which is as good as header only
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    if !headers.iter().eq(HEADER) {
        return Err(ContactError::DataCorruption {
            line: 1,
            message: format!(
                "expected header '{}' but found '{}'",
                HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }
    rdr.deserialize::<Contact>()
        .map(|row| row.map_err(ContactError::from))
        .collect()
}

fn write_contacts<W: Write>(writer: W, contacts: &[Contact]) -> Result<W> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for contact in contacts {
        wtr.serialize(contact)?;
    }
    wtr.into_inner()
        .map_err(|e| ContactError::Persistence(e.error().to_string()))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
