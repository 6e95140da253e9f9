//! Flat-snapshot cache backing.
//!
//! The whole key→result map lives in memory; `commit` serializes it with a
//! timestamp and replaces the snapshot file via write-then-rename, so a
//! crash mid-commit leaves the prior snapshot intact. A missing or corrupt
//! snapshot downgrades the cache to empty with a status flag instead of
//! failing the caller.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::alphabet::Language;
use crate::cache::{AnalysisCache, CacheStatus, CommitReport};
use crate::error::{LexisError, Result};
use crate::lookup::{LookupKey, RemoteResult};

/// The serialized snapshot record: commit timestamp plus the full map.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    committed_at: DateTime<Utc>,
    entries: HashMap<LookupKey, RemoteResult>,
}

/// In-memory cache persisted to a single snapshot file.
///
/// # Examples
///
/// ```no_run
/// use lexis::cache::{AnalysisCache, CacheStatus, SnapshotCache};
///
/// let mut cache = SnapshotCache::open("analyses.cache");
/// assert_eq!(cache.status(), CacheStatus::New);
/// // ... store results ...
/// cache.commit().unwrap();
/// ```
pub struct SnapshotCache {
    path: Option<PathBuf>,
    entries: HashMap<LookupKey, RemoteResult>,
    status: CacheStatus,
    last_commit: Option<DateTime<Utc>>,
}

impl SnapshotCache {
    /// Open a snapshot file, starting empty if it is missing or unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let (entries, status, last_commit) = match fs::read(&path) {
            Ok(bytes) => match bincode::deserialize::<Snapshot>(&bytes) {
                Ok(snapshot) => (
                    snapshot.entries,
                    CacheStatus::Reopened,
                    Some(snapshot.committed_at),
                ),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "snapshot corrupt, starting empty");
                    (HashMap::new(), CacheStatus::Corrupted, None)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                (HashMap::new(), CacheStatus::New, None)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot unreadable, starting empty");
                (HashMap::new(), CacheStatus::Corrupted, None)
            }
        };
        SnapshotCache {
            path: Some(path),
            entries,
            status,
            last_commit,
        }
    }

    /// An ephemeral cache with no snapshot file, for tests and one-shot
    /// runs. `commit` only records a timestamp.
    pub fn in_memory() -> Self {
        SnapshotCache {
            path: None,
            entries: HashMap::new(),
            status: CacheStatus::New,
            last_commit: None,
        }
    }

    /// Startup status of this cache.
    pub fn status(&self) -> CacheStatus {
        self.status
    }

    /// When the current in-memory state was last committed, if ever.
    pub fn last_commit(&self) -> Option<DateTime<Utc>> {
        self.last_commit
    }

    fn read_persisted(&self) -> HashMap<LookupKey, RemoteResult> {
        let Some(path) = &self.path else {
            return HashMap::new();
        };
        match fs::read(path) {
            Ok(bytes) => bincode::deserialize::<Snapshot>(&bytes)
                .map(|s| s.entries)
                .unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    /// Compare in-memory keys against the last-persisted snapshot without
    /// mutating either side.
    pub fn commit_report(&self) -> CommitReport {
        let persisted = self.read_persisted();
        let mut report = CommitReport::default();
        for key in persisted.keys() {
            if self.entries.contains_key(key) {
                report.will_be_replaced.push(key.clone());
            } else {
                report.will_be_deleted.push(key.clone());
            }
        }
        for key in self.entries.keys() {
            if !persisted.contains_key(key) {
                report.will_be_added.push(key.clone());
            }
        }
        report.will_be_deleted.sort();
        report.will_be_replaced.sort();
        report.will_be_added.sort();
        report
    }

    /// Copy entries matching `predicate` from another cache into memory.
    /// Returns the number of entries copied. Existing keys are replaced;
    /// nothing is persisted until [`AnalysisCache::commit`].
    pub fn import_from<F>(&mut self, source: &dyn AnalysisCache, predicate: F) -> Result<usize>
    where
        F: Fn(&LookupKey, &RemoteResult) -> bool,
    {
        let mut copied = 0;
        for (key, result) in source.entries()? {
            if predicate(&key, &result) {
                self.entries.insert(key, result);
                copied += 1;
            }
        }
        Ok(copied)
    }
}

impl AnalysisCache for SnapshotCache {
    fn lookup(&self, key: &LookupKey) -> Result<Option<RemoteResult>> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &LookupKey, result: &RemoteResult) -> Result<()> {
        self.entries.insert(key.clone(), result.clone());
        Ok(())
    }

    fn remove(&mut self, key: &LookupKey) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn count(&self, lang: Option<Language>) -> Result<usize> {
        Ok(match lang {
            None => self.entries.len(),
            Some(l) => self.entries.keys().filter(|k| k.lang() == l).count(),
        })
    }

    fn keys(&self) -> Result<Vec<LookupKey>> {
        let mut keys: Vec<_> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn entries(&self) -> Result<Vec<(LookupKey, RemoteResult)>> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn commit(&mut self) -> Result<()> {
        let committed_at = Utc::now();
        if let Some(path) = &self.path {
            let snapshot = Snapshot {
                committed_at,
                entries: self.entries.clone(),
            };
            let bytes = bincode::serialize(&snapshot)?;

            // Write-then-rename keeps the prior snapshot intact if this
            // process dies mid-write.
            let mut tmp = path.as_os_str().to_owned();
            tmp.push(".tmp");
            let tmp = PathBuf::from(tmp);
            fs::write(&tmp, &bytes)?;
            fs::rename(&tmp, path).map_err(|e| {
                LexisError::cache(format!(
                    "failed to move snapshot into place at {}: {e}",
                    path.display()
                ))
            })?;
        }
        self.last_commit = Some(committed_at);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> LookupKey {
        LookupKey::new(text, Language::Latin)
    }

    fn doc(text: &str) -> RemoteResult {
        RemoteResult::Ok(format!("<analyses>{text}</analyses>"))
    }

    #[test]
    fn test_store_lookup_remove() {
        let mut cache = SnapshotCache::in_memory();
        cache.store(&key("arma"), &doc("a")).unwrap();
        assert_eq!(cache.lookup(&key("arma")).unwrap(), Some(doc("a")));
        assert!(cache.remove(&key("arma")).unwrap());
        assert!(!cache.remove(&key("arma")).unwrap());
        assert_eq!(cache.lookup(&key("arma")).unwrap(), None);
    }

    #[test]
    fn test_count_by_language() {
        let mut cache = SnapshotCache::in_memory();
        cache.store(&key("arma"), &doc("a")).unwrap();
        cache
            .store(&LookupKey::new("mhnin", Language::Greek), &doc("m"))
            .unwrap();
        assert_eq!(cache.count(None).unwrap(), 2);
        assert_eq!(cache.count(Some(Language::Latin)).unwrap(), 1);
        assert_eq!(cache.count(Some(Language::Greek)).unwrap(), 1);
    }

    #[test]
    fn test_commit_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("la.cache");

        let mut cache = SnapshotCache::open(&path);
        assert_eq!(cache.status(), CacheStatus::New);
        cache.store(&key("arma"), &doc("a")).unwrap();
        cache.commit().unwrap();
        assert!(cache.last_commit().is_some());

        let reopened = SnapshotCache::open(&path);
        assert_eq!(reopened.status(), CacheStatus::Reopened);
        assert_eq!(reopened.lookup(&key("arma")).unwrap(), Some(doc("a")));
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("la.cache");
        fs::write(&path, b"not a snapshot").unwrap();

        let cache = SnapshotCache::open(&path);
        assert_eq!(cache.status(), CacheStatus::Corrupted);
        assert_eq!(cache.count(None).unwrap(), 0);
    }

    #[test]
    fn test_commit_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("la.cache");

        let mut cache = SnapshotCache::open(&path);
        cache.store(&key("a"), &doc("1")).unwrap();
        cache.store(&key("b"), &doc("2")).unwrap();
        cache.commit().unwrap();

        // A updated, B removed, C added; nothing committed yet.
        cache.store(&key("a"), &doc("3")).unwrap();
        cache.remove(&key("b")).unwrap();
        cache.store(&key("c"), &doc("4")).unwrap();

        let report = cache.commit_report();
        assert_eq!(report.will_be_deleted, vec![key("b")]);
        assert_eq!(report.will_be_replaced, vec![key("a")]);
        assert_eq!(report.will_be_added, vec![key("c")]);

        // Neither side mutated.
        assert_eq!(cache.count(None).unwrap(), 2);
        let on_disk = SnapshotCache::open(&path);
        assert_eq!(on_disk.lookup(&key("b")).unwrap(), Some(doc("2")));
    }

    #[test]
    fn test_clear() {
        let mut cache = SnapshotCache::in_memory();
        cache.store(&key("arma"), &doc("a")).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.count(None).unwrap(), 0);
    }
}
