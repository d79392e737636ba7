//! The roster cache: the last-fetched member collection.
//!
//! Holds the collection in memory and mirrors it into the durable key-value
//! store under two fixed keys, one for the serialized collection and one for
//! the fetch timestamp. The cache is valid whenever both keys are present;
//! validity never depends on elapsed time, so data lives until an explicit
//! refresh or clear.

use super::KvStore;
use super::client::Client;
use crate::Result;
use crate::model::Member;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;

const LOG_TARGET: &str = "    roster";

/// Storage key holding the serialized member collection.
pub const MEMBERS_KEY: &str = "members";

/// Storage key holding the fetch timestamp, in milliseconds since the epoch.
pub const SYNCED_AT_KEY: &str = "members_synced_at";

/// In-memory member collection backed by durable storage and the document
/// store.
#[derive(Debug)]
pub struct Roster {
    store: Option<Client>,
    kv: KvStore,
    members: Vec<Member>,
}

impl Roster {
    /// Create a roster. Passing `None` for the store client leaves the roster
    /// serving persisted data only, which is a supported degraded mode.
    #[must_use]
    pub fn new(store: Option<Client>, kv: KvStore) -> Self {
        if store.is_none() {
            log::warn!(target: LOG_TARGET, "No document store configured, the roster will only serve previously cached data");
        }

        Self {
            store,
            kv,
            members: Vec::new(),
        }
    }

    /// Load the member collection.
    ///
    /// With `force_refresh` false and both storage keys present, the persisted
    /// collection is served without contacting the document store. Otherwise
    /// the document store is queried and both the in-memory and persisted
    /// copies are replaced. A failed query falls back to any persisted copy,
    /// and to an empty collection if there is none. This never fails; storage
    /// and network problems are logged and degrade the result.
    pub async fn load(&mut self, force_refresh: bool) -> &[Member] {
        if !force_refresh
            && self.is_valid()
            && let Some(members) = self.read_persisted()
        {
            log::debug!(target: LOG_TARGET, "Serving {} member(s) from durable storage", members.len());
            self.members = members;
            return &self.members;
        }

        let fetched = match &self.store {
            Some(client) => match client.list_members().await {
                Ok(members) => Some(members),
                Err(e) => {
                    log::error!(target: LOG_TARGET, "Could not query document store: {e:#}");
                    None
                }
            },
            None => {
                log::debug!(target: LOG_TARGET, "Skipping document store query, no store configured");
                None
            }
        };

        match fetched {
            Some(members) => {
                log::info!(target: LOG_TARGET, "Fetched {} member(s) from the document store", members.len());
                self.set(members);
            }
            None => {
                self.members = self.read_persisted().unwrap_or_default();
            }
        }

        &self.members
    }

    /// The in-memory collection. Synchronous, performs no I/O.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Replace both the in-memory and persisted copies of the collection.
    ///
    /// If persisting fails the storage keys are cleared and the in-memory
    /// collection is emptied, leaving the cache in its "absent" state.
    pub fn set(&mut self, members: Vec<Member>) {
        self.members = members;

        if let Err(e) = self.persist() {
            log::error!(target: LOG_TARGET, "Could not persist member collection: {e:#}");
            self.clear();
        }
    }

    /// Remove both storage keys and empty the in-memory collection.
    pub fn clear(&mut self) {
        self.members.clear();

        if let Err(e) = self.kv.remove(MEMBERS_KEY) {
            log::warn!(target: LOG_TARGET, "Could not remove storage key '{MEMBERS_KEY}': {e:#}");
        }
        if let Err(e) = self.kv.remove(SYNCED_AT_KEY) {
            log::warn!(target: LOG_TARGET, "Could not remove storage key '{SYNCED_AT_KEY}': {e:#}");
        }
    }

    /// Whether both storage keys are present. Never consults the clock.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.kv.contains(MEMBERS_KEY) && self.kv.contains(SYNCED_AT_KEY)
    }

    /// When the persisted collection was fetched, if known.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.kv.get(SYNCED_AT_KEY).ok()??;
        let millis = raw.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.members).into_app_err("serializing member collection")?;
        self.kv.set(MEMBERS_KEY, &json)?;
        self.kv.set(SYNCED_AT_KEY, &Utc::now().timestamp_millis().to_string())
    }

    /// Read and parse the persisted collection. A corrupt value counts as a
    /// persistence failure: both keys are cleared and `None` is returned.
    fn read_persisted(&mut self) -> Option<Vec<Member>> {
        let raw = match self.kv.get(MEMBERS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not read persisted members: {e:#}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(members) => Some(members),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Persisted member collection is corrupt, discarding it: {e:#}");
                self.clear();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(temp: &tempfile::TempDir) -> Roster {
        Roster::new(None, KvStore::new(temp.path()))
    }

    fn member(id: &str) -> Member {
        Member {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            ..Member::default()
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_set_populates_both_keys() {
        let temp = tempfile::tempdir().unwrap();
        let mut roster = roster(&temp);

        roster.set(vec![member("m-1")]);

        assert!(roster.is_valid());
        assert_eq!(roster.members().len(), 1);
        assert!(roster.fetched_at().is_some());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_clear_removes_both_keys() {
        let temp = tempfile::tempdir().unwrap();
        let mut roster = roster(&temp);

        roster.set(vec![member("m-1")]);
        roster.clear();

        assert!(!roster.is_valid());
        assert!(roster.members().is_empty());
        assert!(roster.fetched_at().is_none());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_validity_ignores_age() {
        let temp = tempfile::tempdir().unwrap();
        let kv = KvStore::new(temp.path());

        // A years-old timestamp still counts as valid; only key presence matters.
        kv.set(MEMBERS_KEY, "[]").unwrap();
        kv.set(SYNCED_AT_KEY, "1262304000000").unwrap();

        let roster = Roster::new(None, kv);
        assert!(roster.is_valid());
        assert_eq!(roster.fetched_at().unwrap().timestamp_millis(), 1_262_304_000_000);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_validity_requires_both_keys() {
        let temp = tempfile::tempdir().unwrap();
        let kv = KvStore::new(temp.path());

        kv.set(MEMBERS_KEY, "[]").unwrap();

        let roster = Roster::new(None, kv);
        assert!(!roster.is_valid());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    async fn test_load_without_store_serves_persisted_copy() {
        let temp = tempfile::tempdir().unwrap();

        let mut writer = roster(&temp);
        writer.set(vec![member("m-1"), member("m-2")]);

        let mut reader = roster(&temp);
        let members = reader.load(false).await;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, "m-1");
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    async fn test_load_without_store_or_cache_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut roster = roster(&temp);

        assert!(roster.load(false).await.is_empty());
        assert!(roster.load(true).await.is_empty());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    async fn test_load_discards_corrupt_persisted_data() {
        let temp = tempfile::tempdir().unwrap();
        let kv = KvStore::new(temp.path());

        kv.set(MEMBERS_KEY, "not json").unwrap();
        kv.set(SYNCED_AT_KEY, "1262304000000").unwrap();

        let mut roster = Roster::new(None, kv);
        assert!(roster.load(false).await.is_empty());
        assert!(!roster.is_valid());
    }
}
