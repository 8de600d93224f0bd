//! JSON-file key-value store.
//!
//! The file holds a single JSON object whose values are strings:
//!
//! ```json
//! { "cart": "[{\"product\":{...},\"quantity\":2}]" }
//! ```
//!
//! Every write rewrites the whole file through a sibling temp file followed
//! by a rename, so readers never observe a half-written store. Reads report
//! a file that is not a JSON object as corrupt; the next write replaces it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use blogbox_core::{KeyValueStore, StorageError};
use tracing::{debug, instrument, warn};

/// A [`KeyValueStore`] persisted as a JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at `path`. Nothing is touched until the first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    /// Entries to rewrite on the next write. A corrupt file is treated as an
    /// empty store so that the write replaces it.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt(reason)) => {
                warn!(%reason, "Storage file is corrupt, replacing it");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Unavailable(format!("cannot encode store: {e}")))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "Wrote storage file");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load_for_write()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
