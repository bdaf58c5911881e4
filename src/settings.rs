// config lets the store path live in a separate file instead of the binary
use config::{Config, File, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::{Store, DEFAULT_STORE_PATH};

/// Base name of the optional config file looked up in the working directory,
/// e.g. `contactbook.toml` or `contactbook.json`.
pub const CONFIG_NAME: &str = "contactbook";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub store_path: PathBuf,
    pub log_filter: String,
}

impl Settings {
    /// Defaults, overlaid by `contactbook.*` if one is present.
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(CONFIG_NAME).required(false))
    }
    /// Defaults, overlaid by a config file that must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(File::from(path.as_ref()).required(true))
    }
    pub fn store(&self) -> Store {
        Store::new(&self.store_path)
    }
    fn build(source: impl Source + Send + Sync + 'static) -> Result<Self> {
        let settings = Config::builder()
            .set_default("store_path", DEFAULT_STORE_PATH)?
            .set_default("log_filter", "warn")?
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_filter: "warn".to_string(),
        }
    }
}
