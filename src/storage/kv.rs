use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{VizError, VizResult};

/// String key-value persistence injected into the history and theme stores.
///
/// Implementations are read-modify-write without locking; concurrent writers may lose updates.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> VizResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> VizResult<()>;
    fn remove(&mut self, key: &str) -> VizResult<()>;
}

/// Process-local store, used in tests and with `--store` disabled.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> VizResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> VizResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> VizResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Single JSON object file mapping keys to string values.
///
/// A missing file reads as empty; parent directories are created on first write.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/pr-visualizer/storage.json`, if the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("pr-visualizer").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> VizResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read store '{}'", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            VizError::storage(format!("store '{}' is not valid JSON: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> VizResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create store directory '{}'", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("write store '{}'", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> VizResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> VizResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> VizResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/kv.rs"]
mod tests;
