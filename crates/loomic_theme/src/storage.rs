//! Durable key-value storage
//!
//! The theme selection survives reloads by living in a [`ThemeStore`] under
//! [`THEME_STORAGE_KEY`]. Values are plain strings, last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::channel::{BroadcastChannel, ThemeChannel, ThemeSignal};
use crate::error::{Result, ThemeError};

/// Storage key holding the active theme key
pub const THEME_STORAGE_KEY: &str = "loomic-theme";

/// Storage key used by the auth client for its token. Never touched here;
/// listed so callers can keep the two apart.
pub const AUTH_TOKEN_STORAGE_KEY: &str = "loomic_auth_token";

/// Durable string key-value store
pub trait ThemeStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: ThemeStore + ?Sized> ThemeStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<T: ThemeStore + ?Sized> ThemeStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// Read a stored value, treating storage failure as "nothing stored"
pub fn read_or_none<S: ThemeStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(err) => {
            warn!("failed to read {:?} from storage: {}", key, err);
            None
        }
    }
}

/// Shared in-memory store.
///
/// Clones share the same map, so handing a clone to each context models a
/// single browser origin's storage. With [`MemoryStore::with_notifier`]
/// every write that changes a value also publishes a
/// [`ThemeSignal::StorageChanged`]; rewriting the same value is silent.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<FxHashMap<String, String>>>,
    notifier: Option<BroadcastChannel>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a storage-change signal on `channel` after every write
    pub fn with_notifier(channel: BroadcastChannel) -> Self {
        Self {
            items: Arc::default(),
            notifier: Some(channel),
        }
    }

    fn notify(&self, key: &str, new_value: Option<&str>) {
        if let Some(channel) = &self.notifier {
            channel.publish(ThemeSignal::StorageChanged {
                key: key.to_string(),
                new_value: new_value.map(str::to_string),
            });
        }
    }

    fn poisoned() -> ThemeError {
        ThemeError::Storage("memory store lock poisoned".to_string())
    }
}

impl ThemeStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let previous = self
            .items
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.notify(key, Some(value));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let removed = self
            .items
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(key);
        if removed.is_some() {
            self.notify(key, None);
        }
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file.
///
/// A missing file reads as empty. Each write goes through its own uniquely
/// named sibling temp file and a rename, so readers never observe a
/// half-written document and concurrent writers never share a temp path.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, items)?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        debug!("FileStore::save - {}", self.path.display());
        Ok(())
    }
}

impl ThemeStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
