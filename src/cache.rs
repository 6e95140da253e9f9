//! Response caching for lookup results.
//!
//! This module exposes one capability trait, [`AnalysisCache`], with two
//! interchangeable backings so the pipeline stays backing-agnostic:
//!
//! - [`SnapshotCache`](snapshot::SnapshotCache): the full map held in
//!   memory and serialized to a flat snapshot file on [`commit`]
//! - [`SqliteCache`](sqlite::SqliteCache): a transactional relational
//!   store, durable per write
//!
//! Cached values are [`RemoteResult`]s: successes and retryable rejections
//! both, so a retry pass can distinguish "never tried" from "tried and
//! rejected". Fatal transport errors are not values and cannot be cached.
//!
//! No backing is safe for concurrent mutation; callers serialize access.
//!
//! [`commit`]: AnalysisCache::commit

use std::fmt;

use crate::alphabet::Language;
use crate::error::Result;
use crate::lookup::{LookupKey, RemoteResult};

pub mod snapshot;
pub mod sqlite;

pub use snapshot::SnapshotCache;
pub use sqlite::SqliteCache;

/// Startup status of a cache backing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    /// No prior persisted state existed.
    New,
    /// Prior persisted state was loaded.
    Reopened,
    /// Prior persisted state existed but could not be read; the cache
    /// started empty.
    Corrupted,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheStatus::New => write!(f, "new_cache"),
            CacheStatus::Reopened => write!(f, "reopened_cache"),
            CacheStatus::Corrupted => write!(f, "corrupted_cache"),
        }
    }
}

/// What a commit would change, computed without mutating either side.
///
/// Keys are reported in sorted order for stable presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Keys only in the persisted snapshot; a commit would lose them.
    pub will_be_deleted: Vec<LookupKey>,
    /// Keys present on both sides; a commit overwrites them.
    pub will_be_replaced: Vec<LookupKey>,
    /// Keys only in memory; a commit adds them.
    pub will_be_added: Vec<LookupKey>,
}

/// A key-value store from canonical lookup keys to fetch results.
pub trait AnalysisCache {
    /// Look up a key. `Ok(None)` means the key was never stored.
    fn lookup(&self, key: &LookupKey) -> Result<Option<RemoteResult>>;

    /// Store or replace the result for a key.
    fn store(&mut self, key: &LookupKey, result: &RemoteResult) -> Result<()>;

    /// Remove a key. Returns whether it was present.
    fn remove(&mut self, key: &LookupKey) -> Result<bool>;

    /// Number of entries, optionally restricted to one language.
    fn count(&self, lang: Option<Language>) -> Result<usize>;

    /// All stored keys.
    fn keys(&self) -> Result<Vec<LookupKey>>;

    /// All stored entries, for bulk transfer between backings.
    fn entries(&self) -> Result<Vec<(LookupKey, RemoteResult)>>;

    /// Durably persist the current state. Implicit per write for the
    /// transactional backing.
    fn commit(&mut self) -> Result<()>;

    /// Remove every entry.
    fn clear(&mut self) -> Result<()>;
}
