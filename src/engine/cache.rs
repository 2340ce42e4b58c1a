//! Local key-value cache used for dashboard preferences and visit counts.
//!
//! The cache is a plain string store; callers serialize structured values as
//! JSON. A corrupt or missing value always reads as absent, never as an error.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::warn;

use crate::models::DisplayMode;

/// Well-known cache keys
pub mod keys {
    pub const DISPLAY_MODE: &str = "displayMode";
    pub const SERVICES_ORDER: &str = "servicesOrder";
    pub const SERVICE_VISITS: &str = "serviceVisits";
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
}

/// String key-value store with best-effort persistence
pub trait LocalCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory cache, used in tests and as a fallback
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

/// File-backed cache that rewrites a small JSON document on every change.
///
/// Persistence failures are logged and otherwise ignored; the in-memory view
/// stays authoritative for the life of the process.
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileCache {
    pub fn open(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(error) => {
                    warn!(path = %path.display(), %error, "cache file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(%error, "failed to serialize cache contents");
                return;
            }
        };
        if let Err(error) = std::fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), %error, "failed to persist cache file");
        }
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
            self.persist(&entries);
        }
    }
}

/// Read the saved manual ordering, if one was committed
pub fn saved_order(cache: &dyn LocalCache) -> Option<Vec<u64>> {
    let raw = cache.get(keys::SERVICES_ORDER)?;
    serde_json::from_str(&raw).ok()
}

/// Persist the manual ordering alongside the active display mode
pub fn save_order(cache: &dyn LocalCache, ordered_ids: &[u64], mode: DisplayMode) {
    if let Ok(serialized) = serde_json::to_string(ordered_ids) {
        cache.set(keys::SERVICES_ORDER, &serialized);
    }
    save_display_mode(cache, mode);
}

pub fn saved_display_mode(cache: &dyn LocalCache) -> Option<DisplayMode> {
    let raw = cache.get(keys::DISPLAY_MODE)?;
    raw.parse().ok()
}

pub fn save_display_mode(cache: &dyn LocalCache, mode: DisplayMode) {
    cache.set(keys::DISPLAY_MODE, &mode.to_string());
}

pub fn is_authenticated(cache: &dyn LocalCache) -> bool {
    cache
        .get(keys::IS_AUTHENTICATED)
        .map(|value| value == "true")
        .unwrap_or(false)
}

pub fn set_authenticated(cache: &dyn LocalCache, authenticated: bool) {
    if authenticated {
        cache.set(keys::IS_AUTHENTICATED, "true");
    } else {
        cache.remove(keys::IS_AUTHENTICATED);
    }
}
