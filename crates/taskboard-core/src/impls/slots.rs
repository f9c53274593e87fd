//! DurableSlot implementations.
//!
//! - **InMemoryDurableSlot**: HashMap behind a Mutex, for tests and single-process demos.
//! - **FileDurableSlot**: one file per key under a directory, surviving restarts
//!   the way browser local storage does.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::{DurableSlot, SlotError};

#[derive(Debug, Default)]
pub struct InMemoryDurableSlot {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryDurableSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableSlot for InMemoryDurableSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        // poisoned only if a writer panicked mid-insert; the map is still usable
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// FileDurableSlot stores each key as `<dir>/<key>.json`.
///
/// Keys may only contain ASCII alphanumerics, `-`, `_`, `.` and `:`; the
/// colon is mapped to `_` in the file name.
#[derive(Debug, Clone)]
pub struct FileDurableSlot {
    dir: PathBuf,
}

impl FileDurableSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if !valid {
            return Err(SlotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key.replace(':', "_"))))
    }
}

impl DurableSlot for FileDurableSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // write-then-rename so a reader never sees half a snapshot
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
