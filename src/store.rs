//! Durable Key-Value Slots
//!
//! The stack is persisted as one JSON string in a named slot. `FileStore`
//! keeps one file per key under a state directory; `MemoryStore` backs tests
//! and embedders that bring their own persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

/// Slot holding the serialized stack.
pub const STACK_SLOT: &str = "foodStack";

/// A string-keyed, string-valued persistence layer.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one slot, handy for restoring a saved stack.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = FxHashMap::default();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per slot under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read slot {:?}", path)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create state directory {:?}", self.dir))?;

        // Write then rename so a crash never leaves a half-written slot
        let path = self.slot_path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).with_context(|| format!("Failed to write {:?}", tmp))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::debug!("Could not remove {:?}: {}", tmp, cleanup);
            }
            return Err(e).with_context(|| format!("Failed to move {:?} into place", path));
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove slot {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(STACK_SLOT).unwrap(), None);

        store.set(STACK_SLOT, "[]").unwrap();
        assert_eq!(store.get(STACK_SLOT).unwrap().as_deref(), Some("[]"));

        store.remove(STACK_SLOT).unwrap();
        assert_eq!(store.get(STACK_SLOT).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get(STACK_SLOT).unwrap(), None);

        store.set(STACK_SLOT, "first").unwrap();
        store.set(STACK_SLOT, "second").unwrap();
        assert_eq!(store.get(STACK_SLOT).unwrap().as_deref(), Some("second"));
        assert!(dir.path().join("state").join("foodStack.json").exists());

        store.remove(STACK_SLOT).unwrap();
        store.remove(STACK_SLOT).unwrap();
        assert_eq!(store.get(STACK_SLOT).unwrap(), None);
    }

    #[test]
    fn test_file_store_failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the slot file should go blocks the rename
        let blocker = dir.path().join(format!("{}.json", STACK_SLOT));
        fs::create_dir_all(blocker.join("inner")).unwrap();

        let mut store = FileStore::new(dir.path());
        assert!(store.set(STACK_SLOT, "[]").is_err());

        let tmp = dir.path().join(format!(".{}.json.tmp", STACK_SLOT));
        assert!(!tmp.exists());
    }
}
