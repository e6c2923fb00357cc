//! JSON file storage
//!
//! All keys live in one JSON object on disk. Every write rewrites the whole
//! file through a temporary sibling followed by a rename, so a reader never
//! observes a half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::{Error, Result};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a JSON object in a single file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read all entries. A missing file is an empty store.
    fn read_entries(&self) -> Result<Entries> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read entries for a write, starting over if the file is unreadable JSON.
    /// The flag is true when the file has to be rewritten regardless.
    fn read_entries_for_write(&self) -> Result<(Entries, bool)> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(Error::Json(e)) => {
                warn!(
                    "Storage file {} is corrupt ({}), starting from an empty store",
                    self.path.display(),
                    e
                );
                Ok((Entries::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".to_string()))?;

        let (mut entries, recovered) = self.read_entries_for_write()?;
        if f(&mut entries) || recovered {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        debug!("Reading '{}' from {}", key, self.path.display());
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("Writing '{}' to {}", key, self.path.display());
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!("Removing '{}' from {}", key, self.path.display());
        self.modify(|entries| entries.remove(key).is_some())
    }
}
