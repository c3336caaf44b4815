//! Known words persisted as a JSON array of ids.

use hsk_core::{EntryId, KnownSet, MemorySet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt known-word file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed known set. Changes are kept in memory until [`save`].
///
/// [`save`]: KnownFile::save
#[derive(Debug)]
pub struct KnownFile {
    path: PathBuf,
    set: MemorySet,
    dirty: bool,
}

impl KnownFile {
    /// Load the file, starting empty when it does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let set = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemorySet::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), known = set.len(), "loaded known words");
        Ok(Self {
            path,
            set,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the set if it changed since the last load or save.
    pub fn save(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(&self.set).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "saved known words");
        Ok(())
    }
}

impl KnownSet for KnownFile {
    fn contains(&self, id: EntryId) -> bool {
        self.set.contains(id)
    }

    fn add(&mut self, id: EntryId) -> bool {
        let added = self.set.add(id);
        self.dirty |= added;
        added
    }

    fn remove(&mut self, id: EntryId) -> bool {
        let removed = self.set.remove(id);
        self.dirty |= removed;
        removed
    }

    fn all(&self) -> Vec<EntryId> {
        self.set.all()
    }

    fn len(&self) -> usize {
        self.set.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hsk-trainer-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_starts_empty() {
        let store = KnownFile::load(temp_path("missing.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip.json");
        let mut store = KnownFile::load(&path).unwrap();
        store.add(7);
        store.add(3);
        store.save().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[3,7]");
        let reloaded = KnownFile::load(&path).unwrap();
        assert_eq!(reloaded.all(), vec![3, 7]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(KnownFile::load(&path), Err(StoreError::Json { .. })));
        std::fs::remove_file(&path).ok();
    }
}
