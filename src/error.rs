use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Data corruption on line {line}: {message}")]
    DataCorruption { line: u64, message: String },
    #[error("Invalid input: {message}")]
    Parse { message: String },
    #[error("Invalid selection {position}: there are {len} contacts")]
    InvalidSelection { position: usize, len: usize },
    #[error("Could not export to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: Box<ContactError>,
    },
    #[error("Refusing to export over the contact file itself: {}", .path.display())]
    ExportOverStore { path: PathBuf },
}

impl ContactError {
    /// Errors caused by what the user typed, as opposed to the state of the disk.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::InvalidSelection { .. } | Self::ExportOverStore { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;

// Helper conversions
impl From<std::io::Error> for ContactError {
    fn from(e: std::io::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<csv::Error> for ContactError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        match e.kind() {
            csv::ErrorKind::Io(_) => Self::Persistence(e.to_string()),
            _ => Self::DataCorruption { line, message: e.to_string() },
        }
    }
}

impl From<config::ConfigError> for ContactError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
