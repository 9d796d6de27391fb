//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

const EXTENSION: &str = "json";

#[derive(Debug)]
enum Backend {
    /// One `<key>.json` file per key.
    Directory(PathBuf),
    Memory(Mutex<HashMap<String, Vec<u8>>>),
}

/// Type-safe key-value store.
///
/// Values are stored as JSON. Cloning a `Cache` yields a handle to the
/// same store.
#[derive(Debug, Clone)]
pub struct Cache {
    backend: Arc<Backend>,
}

impl Cache {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/var/lib/lumen")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| CacheError::OpenError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            backend: Arc::new(Backend::Directory(dir.to_path_buf())),
        })
    }

    /// Open a store that lives only as long as this handle and its clones.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(HashMap::new()))),
        }
    }

    /// Directory backing this store, if any.
    pub fn location(&self) -> Option<&Path> {
        match self.backend.as_ref() {
            Backend::Directory(dir) => Some(dir),
            Backend::Memory(_) => None,
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, bytes)
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Directory(dir) => match fs::remove_file(entry_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(CacheError::Io {
                    key: key.to_string(),
                    source,
                }),
            },
            Backend::Memory(map) => {
                lock(map)?.remove(key);
                Ok(())
            }
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Directory(dir) => Ok(entry_path(dir, key).is_file()),
            Backend::Memory(map) => Ok(lock(map)?.contains_key(key)),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = match self.backend.as_ref() {
            Backend::Directory(dir) => {
                let entries = fs::read_dir(dir).map_err(|source| CacheError::OpenError {
                    path: dir.display().to_string(),
                    source,
                })?;
                entries
                    .filter_map(Result::ok)
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension()? != EXTENSION {
                            return None;
                        }
                        path.file_stem()?.to_str().map(str::to_string)
                    })
                    .collect::<Vec<_>>()
            }
            Backend::Memory(map) => lock(map)?.keys().cloned().collect(),
        };
        keys.sort();
        Ok(keys)
    }

    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Directory(dir) => match fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(CacheError::Io {
                    key: key.to_string(),
                    source,
                }),
            },
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
        }
    }

    fn set_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Directory(dir) => {
                let io = |source| CacheError::Io {
                    key: key.to_string(),
                    source,
                };
                // Readers see either the old file or the new one.
                let mut tmp = NamedTempFile::new_in(dir).map_err(io)?;
                tmp.write_all(&bytes).map_err(io)?;
                tmp.as_file().sync_all().map_err(io)?;
                tmp.persist(entry_path(dir, key))
                    .map_err(|e| io(e.error))?;
                Ok(())
            }
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes);
                Ok(())
            }
        }
    }
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.{EXTENSION}"))
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::StoreError(format!("invalid key '{key}'")))
    }
}

fn lock<'a>(
    map: &'a Mutex<HashMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'a, HashMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        id: u64,
        quantity: u32,
    }

    fn stores() -> (tempfile::TempDir, Vec<Cache>) {
        let dir = tempfile::tempdir().unwrap();
        let disk = Cache::open(dir.path().join("store")).unwrap();
        (dir, vec![disk, Cache::in_memory()])
    }

    #[test]
    fn test_set_get_delete() {
        let (_dir, stores) = stores();
        for cache in stores {
            let entry = Entry { id: 1, quantity: 3 };
            cache.set("cart", &entry).unwrap();

            assert!(cache.exists("cart").unwrap());
            assert_eq!(cache.get::<Entry>("cart").unwrap(), Some(entry));

            cache.delete("cart").unwrap();
            assert!(!cache.exists("cart").unwrap());
            assert_eq!(cache.get::<Entry>("cart").unwrap(), None);
            cache.delete("cart").unwrap();
        }
    }

    #[test]
    fn test_keys_sorted() {
        let (_dir, stores) = stores();
        for cache in stores {
            cache.set("user", &1).unwrap();
            cache.set("cart", &2).unwrap();
            assert_eq!(cache.keys().unwrap(), vec!["cart", "user"]);
        }
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let cache = Cache::in_memory();
        for key in ["", "../etc", "a/b", "a b"] {
            assert!(matches!(
                cache.set(key, &1),
                Err(CacheError::StoreError(_))
            ));
        }
    }

    #[test]
    fn test_directory_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open(dir.path()).unwrap();
            cache.set("cart", &Entry { id: 7, quantity: 2 }).unwrap();
        }
        let cache = Cache::open(dir.path()).unwrap();
        assert_eq!(
            cache.get::<Entry>("cart").unwrap(),
            Some(Entry { id: 7, quantity: 2 })
        );
        assert!(dir.path().join("cart.json").is_file());
    }

    #[test]
    fn test_corrupt_entry_is_serialize_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cart.json"), b"{not json").unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        assert!(matches!(
            cache.get::<Entry>("cart"),
            Err(CacheError::Serialize(_))
        ));
    }

    #[test]
    fn test_clones_share_memory_store() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("user", &"anna").unwrap();
        assert_eq!(other.get::<String>("user").unwrap().as_deref(), Some("anna"));
    }
}
