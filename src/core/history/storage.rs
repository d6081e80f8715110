//! Session-scoped key/value cache holding the history between invocations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::NavError;

use super::History;

/// Cache key the history is stored under.
pub const HISTORY_KEY: &str = "dotcd-history";

/// Get/put of serialized values by key, scoped to one shell session.
pub trait SessionCache {
    /// Raw value for `key`, or `None` when nothing was stored yet.
    fn get(&self, key: &str) -> Result<Option<String>, NavError>;
    fn put(&self, key: &str, data: &str) -> Result<(), NavError>;
}

/// One JSON file per key in a per-session directory.
#[derive(Debug, Clone)]
pub struct FileSessionCache {
    dir: PathBuf,
}

impl FileSessionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionCache for FileSessionCache {
    fn get(&self, key: &str) -> Result<Option<String>, NavError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NavError::ShellCache(format!("{}: {}", path.display(), e))),
        }
    }

    fn put(&self, key: &str, data: &str) -> Result<(), NavError> {
        fs::create_dir_all(&self.dir).map_err(NavError::ShellCacheWrite)?;
        let path = self.key_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data).map_err(NavError::ShellCacheWrite)?;
        fs::rename(tmp, &path).map_err(NavError::ShellCacheWrite)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Load the history, treating an absent or blank entry as empty.
/// Data that fails to decode is an error, never silently reset.
pub fn load_history(cache: &dyn SessionCache) -> Result<History, NavError> {
    match cache.get(HISTORY_KEY)? {
        Some(data) if !data.trim().is_empty() => Ok(serde_json::from_str(&data)?),
        _ => Ok(History::default()),
    }
}

pub fn save_history(cache: &dyn SessionCache, history: &History) -> Result<(), NavError> {
    let json = serde_json::to_string(history)
        .map_err(|e| NavError::ShellCacheWrite(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    cache.put(HISTORY_KEY, &json)
}

#[cfg(test)]
pub(crate) use memory::MemorySessionCache;
