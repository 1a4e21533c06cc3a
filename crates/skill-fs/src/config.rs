//! JSON configuration loading and saving
//!
//! The sources declaration, the index and every sidecar file share one
//! on-disk convention: pretty-printed JSON with two-space indentation and a
//! trailing newline, written atomically.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// JSON configuration store.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a JSON file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Load a JSON file, falling back to `T::default()` when it does not exist.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        match io::read_text_if_exists(path)? {
            Some(content) => Self::parse(path, &content),
            None => Ok(T::default()),
        }
    }

    /// Render a value the way [`save`](Self::save) writes it.
    pub fn render<T: Serialize>(&self, path: &Path, value: &T) -> Result<String> {
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        content.push('\n');
        Ok(content)
    }

    /// Serialize a value and write it atomically.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = self.render(path, value)?;
        io::write_atomic(path, content.as_bytes())
    }

    fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
