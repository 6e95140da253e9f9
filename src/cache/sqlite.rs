//! Transactional SQLite cache backing.
//!
//! One table keyed by (canonical word, language), holding each result as an
//! opaque serialized blob. Writes are durable immediately, so
//! [`AnalysisCache::commit`] is a no-op. Bulk import runs in a single
//! transaction and fails atomically on any key collision.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::alphabet::Language;
use crate::cache::{AnalysisCache, CacheStatus};
use crate::error::{LexisError, Result};
use crate::lookup::{LookupKey, RemoteResult};

/// Cache backed by a SQLite database.
///
/// # Examples
///
/// ```
/// use lexis::alphabet::Language;
/// use lexis::cache::{AnalysisCache, SqliteCache};
/// use lexis::lookup::{LookupKey, RemoteResult};
///
/// let mut cache = SqliteCache::in_memory().unwrap();
/// let key = LookupKey::new("arma", Language::Latin);
/// cache.store(&key, &RemoteResult::Ok("<analyses/>".into())).unwrap();
/// assert_eq!(cache.count(None).unwrap(), 1);
/// ```
pub struct SqliteCache {
    conn: Connection,
    status: CacheStatus,
}

impl SqliteCache {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let existed = path.as_ref().exists();
        let conn = Connection::open(path)?;
        let status = if existed {
            CacheStatus::Reopened
        } else {
            CacheStatus::New
        };
        SqliteCache::init(conn, status)
    }

    /// Open an in-memory database, for tests and one-shot runs.
    pub fn in_memory() -> Result<Self> {
        SqliteCache::init(Connection::open_in_memory()?, CacheStatus::New)
    }

    fn init(conn: Connection, status: CacheStatus) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS lookups (
                word   TEXT NOT NULL,
                lang   TEXT NOT NULL,
                result TEXT NOT NULL,
                PRIMARY KEY (word, lang)
            )",
            [],
        )?;
        Ok(SqliteCache { conn, status })
    }

    /// Startup status of this cache.
    pub fn status(&self) -> CacheStatus {
        self.status
    }

    /// Copy entries matching `predicate` from another cache, atomically.
    ///
    /// Every copied key must be new; a collision with an existing entry
    /// rolls the whole import back and returns a cache error. Returns the
    /// number of entries copied.
    pub fn import_from<F>(&mut self, source: &dyn AnalysisCache, predicate: F) -> Result<usize>
    where
        F: Fn(&LookupKey, &RemoteResult) -> bool,
    {
        let tx = self.conn.transaction()?;
        let mut copied = 0;
        for (key, result) in source.entries()? {
            if !predicate(&key, &result) {
                continue;
            }
            let blob = serde_json::to_string(&result)?;
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO lookups (word, lang, result) VALUES (?1, ?2, ?3)",
                params![key.text(), key.lang().to_string(), blob],
            )?;
            if inserted == 0 {
                // Transaction dropped without commit: full rollback.
                return Err(LexisError::cache(format!(
                    "import collision on existing key {key}"
                )));
            }
            copied += 1;
        }
        tx.commit()?;
        debug!(copied, "bulk import committed");
        Ok(copied)
    }

    fn row_to_entry(word: String, lang: String, blob: String) -> Result<(LookupKey, RemoteResult)> {
        let lang = Language::parse(&lang)?;
        let result: RemoteResult = serde_json::from_str(&blob)?;
        Ok((LookupKey::new(word, lang), result))
    }
}

impl AnalysisCache for SqliteCache {
    fn lookup(&self, key: &LookupKey) -> Result<Option<RemoteResult>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT result FROM lookups WHERE word = ?1 AND lang = ?2",
                params![key.text(), key.lang().to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match blob {
            None => Ok(None),
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
        }
    }

    fn store(&mut self, key: &LookupKey, result: &RemoteResult) -> Result<()> {
        let blob = serde_json::to_string(result)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO lookups (word, lang, result) VALUES (?1, ?2, ?3)",
            params![key.text(), key.lang().to_string(), blob],
        )?;
        if inserted == 0 {
            // Key collision: fall back to update.
            self.conn.execute(
                "UPDATE lookups SET result = ?3 WHERE word = ?1 AND lang = ?2",
                params![key.text(), key.lang().to_string(), blob],
            )?;
        }
        Ok(())
    }

    fn remove(&mut self, key: &LookupKey) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM lookups WHERE word = ?1 AND lang = ?2",
            params![key.text(), key.lang().to_string()],
        )?;
        Ok(removed > 0)
    }

    fn count(&self, lang: Option<Language>) -> Result<usize> {
        let n: i64 = match lang {
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM lookups", [], |row| row.get(0))?,
            Some(l) => self.conn.query_row(
                "SELECT COUNT(*) FROM lookups WHERE lang = ?1",
                params![l.to_string()],
                |row| row.get(0),
            )?,
        };
        Ok(n as usize)
    }

    fn keys(&self) -> Result<Vec<LookupKey>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, lang FROM lookups ORDER BY lang, word")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut keys = Vec::new();
        for row in rows {
            let (word, lang) = row?;
            keys.push(LookupKey::new(word, Language::parse(&lang)?));
        }
        Ok(keys)
    }

    fn entries(&self) -> Result<Vec<(LookupKey, RemoteResult)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT word, lang, result FROM lookups ORDER BY lang, word")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            let (word, lang, blob) = row?;
            entries.push(SqliteCache::row_to_entry(word, lang, blob)?);
        }
        Ok(entries)
    }

    fn commit(&mut self) -> Result<()> {
        // Durability is per write; nothing to flush.
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM lookups", [])?;
        Ok(())
    }
}
