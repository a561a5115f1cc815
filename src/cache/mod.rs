use crate::core::{ChangelogError, ChangelogResult};
use crate::di::ResponseCache;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Suffix for entries being written; never read back as entries
const TEMP_SUFFIX: &str = ".tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A cached API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

/// Directory-backed response cache keyed by request URL
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Create a cache rooted at `cache_root`, creating the directory if needed
    pub fn new(cache_root: PathBuf) -> ChangelogResult<Self> {
        fs::create_dir_all(&cache_root).map_err(|e| {
            ChangelogError::Cache(format!(
                "Failed to create cache directory: {}: {}",
                cache_root.display(),
                e
            ))
        })?;
        Ok(Self { root: cache_root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the cache path for a request URL
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.root.join(format!("{}.json", Self::url_hash(url)))
    }

    /// Read the entry for `url`
    ///
    /// A missing entry is `Ok(None)`. An entry that cannot be read or decoded
    /// is also treated as a miss so the next successful fetch overwrites it.
    pub fn read_entry(&self, url: &str) -> ChangelogResult<Option<CacheEntry>> {
        let path = self.entry_path(url);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!("ignoring unreadable cache entry {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        match serde_json::from_slice::<CacheEntry>(&data) {
            Ok(entry) if entry.url == url => Ok(Some(entry)),
            Ok(entry) => {
                tracing::warn!(
                    "cache entry {} belongs to {}, ignoring",
                    path.display(),
                    entry.url
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("ignoring corrupt cache entry {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Store the response body for `url`
    ///
    /// The entry is written to a unique temporary file and renamed into place,
    /// so concurrent writers of the same key never leave a torn entry.
    pub fn write_entry(&self, url: &str, body: &serde_json::Value) -> ChangelogResult<()> {
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.clone(),
        };
        let data = serde_json::to_vec(&entry)?;

        let path = self.entry_path(url);
        let temp_path = self.root.join(format!(
            "{}.{}-{}{}",
            Self::url_hash(url),
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed),
            TEMP_SUFFIX
        ));

        let mut file = fs::File::create(&temp_path).map_err(|e| {
            ChangelogError::Cache(format!(
                "Failed to create cache file: {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.write_all(&data).map_err(|e| {
            ChangelogError::Cache(format!(
                "Failed to write to cache: {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ChangelogError::Cache(format!(
                "Failed to move cache entry into place: {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Remove every cached entry, returning how many were deleted
    pub fn clear(&self) -> ChangelogResult<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_entry = path
                .extension()
                .map(|ext| ext == "json" || ext == "tmp")
                .unwrap_or(false);
            if path.is_file() && is_entry {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Hash a URL for use as a filename
    fn url_hash(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let hash = hasher.finalize();
        hex::encode(&hash[..16]) // Use first 16 bytes for shorter filename
    }
}

impl ResponseCache for DiskCache {
    fn get(&self, url: &str) -> ChangelogResult<Option<serde_json::Value>> {
        Ok(self.read_entry(url)?.map(|entry| entry.body))
    }

    fn put(&self, url: &str, body: &serde_json::Value) -> ChangelogResult<()> {
        self.write_entry(url, body)
    }
}
