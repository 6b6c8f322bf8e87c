//! Local persistence helpers for site preferences.
//!
//! Preferences are plain string values under fixed keys. The browser build
//! keeps them in `window.localStorage`; native builds (tests, prerendering)
//! keep a small JSON map in the project data directory.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Key/value persistence for preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Session-only store. Also the fallback when nothing else is reachable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// `window.localStorage`, resolved on every call so a storage that
/// disappears mid-session (private mode quota, revoked permission) surfaces
/// as [`StorageError::Unavailable`].
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

/// JSON map of preferences in a single file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    const FILE_NAME: &'static str = "preferences.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the platform data directory for the site.
    pub fn in_project_dirs() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "Stride", "stride-site")
            .ok_or_else(|| StorageError::Unavailable("no home directory".into()))?;
        Ok(Self::new(dirs.data_dir().join(Self::FILE_NAME)))
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("stride-ui-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.get("stride.locale").unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);
        FileStore::new(&path).set("stride.locale", "en").unwrap();
        FileStore::new(&path).set("other", "1").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("stride.locale").unwrap().as_deref(), Some("en"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("1"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_reports_malformed_content() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        let err = FileStore::new(&path).get("stride.locale").unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
