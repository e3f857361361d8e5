//! Directory-backed record storage.
//!
//! Layout: `<data_dir>/<key>.json`. Each write goes to a uniquely named
//! temp file in the same directory, is synced, then renamed over the record,
//! so a crash mid-write leaves the previous value intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError, validate_key};

/// Record storage in a local directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: String::new(),
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                path,
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_owned(),
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        temp.write_all(value.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&path).map_err(|e| io_err(e.error))?;
        tracing::trace!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                path,
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("fitkart_cart").unwrap(), None);

        store.set("fitkart_cart", "[]").unwrap();
        assert_eq!(store.get("fitkart_cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("fitkart_cart.json").exists());

        store.set("fitkart_cart", "[1]").unwrap();
        assert_eq!(store.get("fitkart_cart").unwrap().as_deref(), Some("[1]"));

        store.remove("fitkart_cart").unwrap();
        assert_eq!(store.get("fitkart_cart").unwrap(), None);
    }

    #[test]
    fn test_overwrite_leaves_only_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        for n in 0..5 {
            store.set("fitkart_orders", &format!("[{n}]")).unwrap();
        }

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["fitkart_orders.json"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("fitkart_orders.json")).unwrap(),
            "[4]"
        );
    }

    #[test]
    fn test_separate_handles_write_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = FileStore::open(dir.path()).unwrap();
        let mut second = FileStore::open(dir.path()).unwrap();

        first.set("fitkart_cart", "[1]").unwrap();
        second.set("fitkart_cart", "[2]").unwrap();
        first.set("fitkart_cart", "[3]").unwrap();

        assert_eq!(second.get("fitkart_cart").unwrap().as_deref(), Some("[3]"));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.remove("fitkart_user").is_ok());
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
