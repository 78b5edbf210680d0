use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "magpies_terminal";
const CACHE_FILE: &str = "feed_cache.json";

static SHARED: Lazy<FeedCache> = Lazy::new(|| FeedCache::open(default_cache_path()));

/// Process-wide cache shared by all feed loaders.
pub fn feed_cache() -> &'static FeedCache {
    &SHARED
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    stored_at: u64,
    ttl_secs: u64,
    payload: String,
}

/// Key→payload store where every entry carries its own time-to-live.
///
/// An entry whose age exceeds its TTL is indistinguishable from absent:
/// `get` purges it before answering. Storage failures are swallowed — the
/// feeds must keep working with caching disabled entirely.
pub struct FeedCache {
    path: Option<PathBuf>,
    file: Mutex<CacheFile>,
}

impl FeedCache {
    /// `path: None` runs the cache in memory only.
    pub fn open(path: Option<PathBuf>) -> Self {
        let file = path.as_deref().map(load_cache_file).unwrap_or_default();
        Self {
            path,
            file: Mutex::new(file),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, unix_now())
    }

    pub fn get_at(&self, key: &str, now: u64) -> Option<String> {
        let mut file = self.file.lock().expect("feed cache lock poisoned");
        let expired = match file.entries.get(key) {
            None => return None,
            Some(entry) => now.saturating_sub(entry.stored_at) > entry.ttl_secs,
        };
        if expired {
            file.entries.remove(key);
            self.persist(&file);
            return None;
        }
        file.entries.get(key).map(|entry| entry.payload.clone())
    }

    pub fn put(&self, key: &str, payload: &str, ttl: Duration) {
        self.put_at(key, payload, ttl, unix_now());
    }

    pub fn put_at(&self, key: &str, payload: &str, ttl: Duration, now: u64) {
        let mut file = self.file.lock().expect("feed cache lock poisoned");
        file.version = CACHE_VERSION;
        file.entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: now,
                ttl_secs: ttl.as_secs(),
                payload: payload.to_string(),
            },
        );
        self.persist(&file);
    }

    fn persist(&self, file: &CacheFile) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        let _ = save_cache_file(path, file);
    }
}

fn load_cache_file(path: &Path) -> CacheFile {
    let Ok(raw) = fs::read_to_string(path) else {
        return CacheFile::default();
    };
    let file = serde_json::from_str::<CacheFile>(&raw).unwrap_or_default();
    if file.version != CACHE_VERSION {
        return CacheFile::default();
    }
    file
}

fn save_cache_file(path: &Path, file: &CacheFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(file).context("serialize feed cache")?;
    fs::write(&tmp, json).context("write feed cache")?;
    fs::rename(&tmp, path).context("swap feed cache")?;
    Ok(())
}

fn default_cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
