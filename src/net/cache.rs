//! On-disk link cache.
//!
//! A single text file holds the creation timestamp on its first line and
//! one link per line after it. Every failure here degrades to "no cache";
//! nothing is propagated to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::config::CACHE_DURATION;
use crate::dom::LinkList;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed cache file: {0}")]
    Malformed(&'static str),
    #[error("unparsable cache timestamp {0:?}")]
    Timestamp(String),
    #[error("failed to write cache {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Contents of the cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub created_at: DateTime<Utc>,
    pub links: LinkList,
}

impl CacheRecord {
    /// Fresh while `now - created_at < window`. A record dated in the
    /// future is never fresh.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, window: std::time::Duration) -> bool {
        let age = now.signed_duration_since(self.created_at);
        match age.to_std() {
            Ok(age) => age < window,
            Err(_) => false,
        }
    }

    fn parse(content: &str) -> Result<Self, CacheError> {
        let mut lines = content.lines();
        let header = lines
            .next()
            .ok_or(CacheError::Malformed("missing timestamp line"))?;
        let created_at = parse_timestamp(header.trim())?;
        let links = lines
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { created_at, links })
    }

    fn render(&self) -> String {
        let mut out = self.created_at.to_rfc3339();
        for link in &self.links {
            out.push('\n');
            out.push_str(link);
        }
        out
    }
}

/// Accepts RFC 3339, or a naive ISO-8601 stamp taken as local time.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, CacheError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CacheError::Timestamp(s.to_string()))
}

/// Singleton link cache stored at a fixed path.
pub struct CacheStore {
    path: PathBuf,
    window: std::time::Duration,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            window: CACHE_DURATION,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record without judging freshness. `Ok(None)` if absent.
    pub fn read(&self) -> Result<Option<CacheRecord>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        CacheRecord::parse(&content).map(Some)
    }

    /// Overwrite the record.
    pub fn write(&self, record: &CacheRecord) -> Result<(), CacheError> {
        let persist = |source| CacheError::Persist {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(persist)?;
        }
        fs::write(&self.path, record.render()).map_err(persist)
    }

    /// Cached links and whether they are still fresh.
    ///
    /// Absent, malformed and stale records all yield `([], false)`.
    pub fn load(&self) -> (LinkList, bool) {
        self.load_at(Utc::now())
    }

    pub fn load_at(&self, now: DateTime<Utc>) -> (LinkList, bool) {
        match self.read() {
            Ok(Some(record)) if record.is_fresh_at(now, self.window) => (record.links, true),
            Ok(Some(record)) if record.created_at > now => {
                log::warn!(
                    "Ignoring cache dated in the future (created {}, now {})",
                    record.created_at,
                    now
                );
                (Vec::new(), false)
            }
            Ok(Some(record)) => {
                log::warn!("Cache expired (created {})", record.created_at);
                (Vec::new(), false)
            }
            Ok(None) => (Vec::new(), false),
            Err(e) => {
                log::error!("Error loading cache: {}", e);
                (Vec::new(), false)
            }
        }
    }

    /// Persist `links` stamped with the current time. Failures are logged.
    pub fn save(&self, links: &[String]) {
        self.save_at(links, Utc::now());
    }

    pub fn save_at(&self, links: &[String], now: DateTime<Utc>) {
        let record = CacheRecord {
            created_at: now,
            links: links.to_vec(),
        };
        match self.write(&record) {
            Ok(()) => log::info!("Saved {} links to cache", links.len()),
            Err(e) => log::error!("Error saving cache: {}", e),
        }
    }

    /// Delete the record. Absent records are fine.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => log::info!("Cache cleared"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::error!("Error clearing cache {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn store() -> (tempfile::TempDir, CacheStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("cache.txt"));
        (dir, store)
    }

    fn links(items: &[&str]) -> LinkList {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        store.save(&links(&["a", "b", "c"]));
        assert_eq!(store.load(), (links(&["a", "b", "c"]), true));
    }

    #[test]
    fn freshness_boundary_is_strict() {
        let (_dir, store) = store();
        let t = Utc::now();
        store.save_at(&links(&["x"]), t);

        let just_inside = t + Duration::minutes(29) + Duration::seconds(59);
        assert_eq!(store.load_at(just_inside), (links(&["x"]), true));

        let boundary = t + Duration::minutes(30);
        assert_eq!(store.load_at(boundary), (Vec::new(), false));

        let later = t + Duration::hours(5);
        assert_eq!(store.load_at(later), (Vec::new(), false));
    }

    #[test]
    fn absent_cache_is_not_fresh() {
        let (_dir, store) = store();
        assert_eq!(store.load(), (Vec::new(), false));
    }

    #[test]
    fn corrupt_timestamp_degrades() {
        let (_dir, store) = store();
        fs::write(store.path(), "yesterday-ish\nacestream://A\n").unwrap();
        assert_eq!(store.load(), (Vec::new(), false));
        assert!(matches!(store.read(), Err(CacheError::Timestamp(_))));
    }

    #[test]
    fn empty_file_degrades() {
        let (_dir, store) = store();
        fs::write(store.path(), "").unwrap();
        assert_eq!(store.load(), (Vec::new(), false));
        assert!(matches!(store.read(), Err(CacheError::Malformed(_))));
    }

    #[test]
    fn unreadable_path_degrades() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let store = CacheStore::new(dir.path());
        assert_eq!(store.load(), (Vec::new(), false));
    }

    #[test]
    fn future_dated_record_is_stale() {
        let (_dir, store) = store();
        let now = Utc::now();
        store.save_at(&links(&["x"]), now + Duration::minutes(5));
        assert_eq!(store.load_at(now), (Vec::new(), false));
    }

    #[test]
    fn reads_naive_local_timestamps() {
        let (_dir, store) = store();
        let created = Local::now().naive_local() - Duration::minutes(1);
        let content = format!(
            "{}\nacestream://A\nacestream://B",
            created.format("%Y-%m-%dT%H:%M:%S%.6f")
        );
        fs::write(store.path(), content).unwrap();

        assert_eq!(store.load(), (links(&["acestream://A", "acestream://B"]), true));
    }

    #[test]
    fn file_layout_is_timestamp_then_links() {
        let (_dir, store) = store();
        store.save(&links(&["acestream://A", "acestream://B"]));

        let content = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(DateTime::parse_from_rfc3339(lines[0]).is_ok());
        assert_eq!(&lines[1..], ["acestream://A", "acestream://B"]);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path().join("profile").join("cache.txt"));
        store.save(&links(&["a"]));
        assert_eq!(store.load(), (links(&["a"]), true));
    }

    #[test]
    fn save_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let store = CacheStore::new(blocker.join("cache.txt"));

        store.save(&links(&["a"]));
        assert_eq!(store.load(), (Vec::new(), false));
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = store();
        store.clear();
        store.save(&links(&["a"]));
        store.clear();
        store.clear();
        assert!(!store.path().exists());
        assert_eq!(store.load(), (Vec::new(), false));
    }
}
