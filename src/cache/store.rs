use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Candidate, Student};

/// Storage key for the cached student roster (JSON array).
pub const KEY_STUDENTS: &str = "cachedStudents";

/// Storage key for the cached candidate list (JSON array).
pub const KEY_CANDIDATES: &str = "cachedCandidates";

/// Storage key for the last successful fetch timestamp (RFC 3339).
pub const KEY_LAST_SYNC: &str = "lastSync";

/// Flat, string-keyed durable store.
///
/// The data service only needs get/set over a handful of well-known keys,
/// so the interface stays that small; swapping in a fake for tests means
/// implementing two methods.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several entries as one unit. Implementations backed by a
    /// single file override this so all entries land in one write.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Store backed by one JSON file holding a flat string map.
///
/// Every mutation rewrites the whole file, so a `set_many` snapshot is
/// never observable half-written across process restarts.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
        }

        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read cache file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse cache file {}", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write cache file {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn set_many(&self, batch: &[(&str, String)]) -> Result<()> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        for (key, value) in batch {
            entries.insert(key.to_string(), value.clone());
        }
        self.persist(&entries)
    }
}

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed cache layer over a [`KeyValueStore`].
///
/// Holds the last-known-good copy of both datasets plus the `lastSync`
/// timestamp. Datasets are written together with `lastSync` in one batch,
/// and only ever after a confirmed successful fetch.
pub struct CacheStore {
    store: Box<dyn KeyValueStore>,
}

impl CacheStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_students(&self) -> Result<Option<Vec<Student>>> {
        self.load_list(KEY_STUDENTS)
    }

    pub fn load_candidates(&self) -> Result<Option<Vec<Candidate>>> {
        self.load_list(KEY_CANDIDATES)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        match self.store.get(key)? {
            None => Ok(None),
            Some(raw) => {
                let parsed = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt cache entry: {key}"))?;
                Ok(Some(parsed))
            }
        }
    }

    pub fn save_students(&self, students: &[Student]) -> Result<()> {
        self.store.set_many(&[
            (KEY_STUDENTS, serde_json::to_string(students)?),
            (KEY_LAST_SYNC, Utc::now().to_rfc3339()),
        ])
    }

    pub fn save_candidates(&self, candidates: &[Candidate]) -> Result<()> {
        self.store.set_many(&[
            (KEY_CANDIDATES, serde_json::to_string(candidates)?),
            (KEY_LAST_SYNC, Utc::now().to_rfc3339()),
        ])
    }

    /// Overwrite both datasets and the sync timestamp as one unit.
    pub fn save_both(&self, students: &[Student], candidates: &[Candidate]) -> Result<()> {
        self.store.set_many(&[
            (KEY_STUDENTS, serde_json::to_string(students)?),
            (KEY_CANDIDATES, serde_json::to_string(candidates)?),
            (KEY_LAST_SYNC, Utc::now().to_rfc3339()),
        ])
    }

    pub fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        match self.store.get(KEY_LAST_SYNC)? {
            None => Ok(None),
            Some(raw) => {
                let parsed = DateTime::parse_from_rfc3339(&raw)
                    .with_context(|| format!("Corrupt lastSync timestamp: {raw}"))?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
        }
    }

    /// Human-readable age of the last successful sync, "never" when none.
    pub fn last_sync_age(&self) -> String {
        match self.last_sync() {
            Ok(Some(when)) => age_display((Utc::now() - when).num_minutes()),
            Ok(None) => "never".to_string(),
            Err(e) => {
                debug!(error = %e, "Failed to read lastSync for age display");
                "unknown".to_string()
            }
        }
    }
}

fn age_display(minutes: i64) -> String {
    if minutes < 1 {
        // Covers clock skew too
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn memory_cache() -> CacheStore {
        CacheStore::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_empty_cache_loads_none() {
        let cache = memory_cache();
        assert!(cache.load_students().expect("load").is_none());
        assert!(cache.load_candidates().expect("load").is_none());
        assert!(cache.last_sync().expect("load").is_none());
        assert_eq!(cache.last_sync_age(), "never");
    }

    #[test]
    fn test_save_students_round_trips_and_stamps_sync() {
        let cache = memory_cache();
        let students = defaults::default_students();

        cache.save_students(&students).expect("save");

        let loaded = cache.load_students().expect("load").expect("cached");
        assert_eq!(loaded, students);
        assert!(cache.last_sync().expect("load").is_some());
        assert_eq!(cache.last_sync_age(), "just now");
    }

    #[test]
    fn test_save_both_writes_one_snapshot() {
        let cache = memory_cache();
        let students = defaults::default_students();
        let candidates = defaults::default_candidates();

        cache.save_both(&students, &candidates).expect("save");

        assert_eq!(cache.load_students().expect("load").expect("cached"), students);
        assert_eq!(
            cache.load_candidates().expect("load").expect("cached"),
            candidates
        );
    }

    #[test]
    fn test_corrupt_entry_is_an_error_not_a_panic() {
        let store = MemoryStore::new();
        store.set(KEY_STUDENTS, "not json").expect("set");
        let cache = CacheStore::new(Box::new(store));

        assert!(cache.load_students().is_err());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "votecache-test-{}-reopen.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let store = FileStore::open(path.clone()).expect("open");
            store
                .set_many(&[
                    (KEY_STUDENTS, "[]".to_string()),
                    (KEY_LAST_SYNC, Utc::now().to_rfc3339()),
                ])
                .expect("set_many");
        }

        let reopened = FileStore::open(path.clone()).expect("reopen");
        assert_eq!(reopened.get(KEY_STUDENTS).expect("get").as_deref(), Some("[]"));
        assert!(reopened.get(KEY_LAST_SYNC).expect("get").is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_age_display_buckets() {
        assert_eq!(age_display(0), "just now");
        assert_eq!(age_display(-3), "just now");
        assert_eq!(age_display(5), "5m ago");
        assert_eq!(age_display(90), "1h ago");
        assert_eq!(age_display(3000), "2d ago");
    }
}
