//! Score store implementations: in-memory and a JSON file on disk.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use anyhow::{Context, Result};

use crate::model::ScoreKey;
use crate::traits::ScoreStore;

/// Histories kept in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: RwLock<HashMap<ScoreKey, Vec<u8>>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self, key: &ScoreKey) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &ScoreKey, points: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        entries.insert(key.clone(), points.to_vec());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<ScoreKey>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        let mut keys: Vec<_> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Histories persisted as one JSON object keyed by `user--qid`.
///
/// The whole document is rewritten on every save, into a sibling temp file
/// that is then renamed over the ledger, so a failed write leaves the
/// previous document in place.
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read ledger from {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse ledger JSON: {}", self.path.display()))
    }

    fn write_all(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).context("failed to serialize ledger")?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create ledger directory {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .with_context(|| format!("failed to write ledger to {}", tmp.path().display()))?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to replace ledger at {}", self.path.display()))?;
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self, key: &ScoreKey) -> Result<Option<Vec<u8>>> {
        Ok(self.read_all()?.remove(&key.to_string()))
    }

    fn save(&self, key: &ScoreKey, points: &[u8]) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("ledger file lock poisoned"))?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), points.to_vec());
        self.write_all(&entries)
    }

    fn keys(&self) -> Result<Vec<ScoreKey>> {
        self.read_all()?
            .keys()
            .map(|k| k.parse::<ScoreKey>().map_err(|e| anyhow::anyhow!(e)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryScoreStore::new();
        let key = ScoreKey::new("alice", QuestionId(42));
        assert_eq!(store.load(&key).unwrap(), None);

        store.save(&key, &[3, 5]).unwrap();
        assert_eq!(store.load(&key).unwrap(), Some(vec![3, 5]));
        assert_eq!(store.keys().unwrap(), vec![key]);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");
        let key = ScoreKey::new("bob", QuestionId(7));

        let store = JsonFileScoreStore::new(&path);
        assert_eq!(store.load(&key).unwrap(), None);
        store.save(&key, &[1, 4]).unwrap();

        let reopened = JsonFileScoreStore::new(&path);
        assert_eq!(reopened.load(&key).unwrap(), Some(vec![1, 4]));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"bob--7\""), "got {raw}");
    }

    #[test]
    fn file_store_lists_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileScoreStore::new(dir.path().join("ledger.json"));
        store.save(&ScoreKey::new("a", QuestionId(2)), &[0]).unwrap();
        store.save(&ScoreKey::new("a", QuestionId(1)), &[5]).unwrap();

        let keys = store.keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&ScoreKey::new("a", QuestionId(1))));
    }

    #[test]
    fn file_store_replaces_ledger_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let store = JsonFileScoreStore::new(&path);
        for n in 1..=5 {
            store.save(&ScoreKey::new("a", QuestionId(n)), &[n as u8]).unwrap();
        }

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from("ledger.json")]);
        assert_eq!(store.keys().unwrap().len(), 5);
    }

    #[test]
    fn failed_write_keeps_previous_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let store = JsonFileScoreStore::new(&path);
        store.save(&ScoreKey::new("a", QuestionId(1)), &[3]).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // The ledger file sits where this store's directory would be created.
        let blocked = JsonFileScoreStore::new(path.join("inner.json"));
        assert!(blocked.save(&ScoreKey::new("a", QuestionId(2)), &[1]).is_err());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = JsonFileScoreStore::new(&path);
        assert!(store.load(&ScoreKey::new("a", QuestionId(1))).is_err());
    }
}
