//! Favorites persistence
//!
//! The watchlist lives under one fixed key in a durable key-value medium.
//! Each screen that shows favorites loads its own `FavoritesStore`; copies do
//! not see each other's writes until they reload, and the last write wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::CatalogItem;

/// Storage key holding the serialized watchlist
pub const WATCHLIST_KEY: &str = "heisflix_watchlist";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Stored favorites are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable string key-value medium
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// =============================================================================
// Backends
// =============================================================================

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves half a file behind
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory medium; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// Favorites Store
// =============================================================================

/// Loaded watchlist with write-through persistence
pub struct FavoritesStore {
    backend: Arc<dyn KeyValueStore>,
    items: Vec<CatalogItem>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Read the watchlist. Absent key means an empty list; a present value
    /// that does not parse is reported as `StoreError::Corrupt`.
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let items = match backend.get(WATCHLIST_KEY)? {
            Some(raw) => parse_items(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { backend, items })
    }

    /// Wipe the stored watchlist, corrupt or not
    pub fn clear(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        backend.remove(WATCHLIST_KEY)?;
        Ok(Self {
            backend,
            items: Vec::new(),
        })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    /// Insert if absent. Returns `true` when the list changed.
    pub fn add(&mut self, item: CatalogItem) -> Result<bool> {
        if self.contains(item.id) {
            return Ok(false);
        }
        self.items.push(item);
        self.persist()?;
        Ok(true)
    }

    /// Delete if present. Returns `true` when the list changed.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Add when absent, remove when present. Returns whether the item is
    /// favorited afterwards.
    pub fn toggle(&mut self, item: CatalogItem) -> Result<bool> {
        if self.contains(item.id) {
            self.remove(item.id)?;
            Ok(false)
        } else {
            self.add(item)?;
            Ok(true)
        }
    }

    /// Serialize the whole list and write it out
    pub fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.items)?;
        self.backend.set(WATCHLIST_KEY, &raw)?;
        tracing::debug!(count = self.items.len(), "Watchlist persisted");
        Ok(())
    }
}

fn parse_items(raw: &str) -> Result<Vec<CatalogItem>> {
    let mut items: Vec<CatalogItem> = serde_json::from_str(raw)?;
    // Keep the first snapshot for any repeated id
    let mut seen = std::collections::HashSet::new();
    items.retain(|m| seen.insert(m.id));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;

    fn memory() -> (MemoryStore, Arc<dyn KeyValueStore>) {
        let mem = MemoryStore::new();
        let backend: Arc<dyn KeyValueStore> = Arc::new(mem.clone());
        (mem, backend)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let (_, backend) = memory();
        let store = FavoritesStore::load(backend).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_writes_through() {
        let (mem, backend) = memory();
        let mut store = FavoritesStore::load(backend).unwrap();
        assert!(store.add(CatalogItem::new(1, MediaKind::Movie, "Heat")).unwrap());
        assert_eq!(
            mem.get(WATCHLIST_KEY).unwrap().as_deref(),
            Some(r#"[{"id":1,"media_type":"movie","title":"Heat"}]"#)
        );
    }

    #[test]
    fn test_add_existing_is_noop() {
        let (_, backend) = memory();
        let mut store = FavoritesStore::load(backend).unwrap();
        store.add(CatalogItem::new(1, MediaKind::Movie, "Heat")).unwrap();
        assert!(!store.add(CatalogItem::new(1, MediaKind::Movie, "Other")).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].title, "Heat");
    }

    #[test]
    fn test_remove_absent_does_not_write() {
        let (mem, backend) = memory();
        let mut store = FavoritesStore::load(backend).unwrap();
        assert!(!store.remove(42).unwrap());
        assert!(mem.get(WATCHLIST_KEY).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_ids_collapsed_on_load() {
        let (mem, backend) = memory();
        mem.set(
            WATCHLIST_KEY,
            r#"[{"id":1,"media_type":"movie","title":"A"},{"id":1,"media_type":"movie","title":"B"}]"#,
        )
        .unwrap();
        let store = FavoritesStore::load(backend).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].title, "A");
    }

    #[test]
    fn test_clear_recovers_from_corruption() {
        let (mem, backend) = memory();
        mem.set(WATCHLIST_KEY, "{not json").unwrap();
        assert!(FavoritesStore::load(backend.clone()).is_err());
        let store = FavoritesStore::clear(backend.clone()).unwrap();
        assert!(store.is_empty());
        assert!(FavoritesStore::load(backend).unwrap().is_empty());
    }
}
