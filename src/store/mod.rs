pub mod disk;
pub mod interchange;
pub mod memory;

use crate::core::fund::{Fund, StoredFund};
use crate::core::ids::IdProvider;
use crate::core::migrate::migrate;
use crate::core::view::{SortOrder, ViewOptions};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub use disk::DiskStore;
pub use memory::MemoryStore;

pub const FUNDS_KEY: &str = "sinkingFunds";
pub const SORT_KEY: &str = "sinkingFunds_sort";
pub const SHOW_COMPLETED_KEY: &str = "sinkingFunds_showCompleted";

/// A string key-value store. Values are opaque to the store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads and saves the fund list and view preferences on top of a
/// [`KeyValueStore`].
pub struct FundRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FundRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads every fund, upgrading legacy records on the way.
    ///
    /// When migration rewrote anything the upgraded list is saved straight
    /// back, so legacy records are only converted once.
    pub fn load_all(&self, now: DateTime<Utc>, ids: &mut dyn IdProvider) -> Result<Vec<Fund>> {
        let Some(raw) = self.store.get(FUNDS_KEY)? else {
            debug!("No stored funds yet");
            return Ok(Vec::new());
        };

        let records: Vec<StoredFund> =
            serde_json::from_str(&raw).context("Failed to parse stored funds")?;
        let migration = migrate(records, now, ids);
        if migration.changed {
            info!("Migrated stored funds to the current format");
            self.save_all(&migration.funds)?;
        }

        debug!("Loaded {} funds", migration.funds.len());
        Ok(migration.funds)
    }

    pub fn save_all(&self, funds: &[Fund]) -> Result<()> {
        let raw = serde_json::to_string(funds).context("Failed to serialize funds")?;
        self.store
            .put(FUNDS_KEY, &raw)
            .context("Failed to save funds")?;
        debug!("Saved {} funds", funds.len());
        Ok(())
    }

    /// Reads the stored view preferences. Anything unreadable falls back to
    /// the defaults.
    pub fn load_preferences(&self) -> Result<ViewOptions> {
        let sort = match self.store.get(SORT_KEY)? {
            Some(raw) => raw.parse::<SortOrder>().unwrap_or_else(|e| {
                debug!("Ignoring stored sort order: {e}");
                SortOrder::default()
            }),
            None => SortOrder::default(),
        };
        let show_completed = self
            .store
            .get(SHOW_COMPLETED_KEY)?
            .is_some_and(|raw| raw == "true");

        Ok(ViewOptions {
            sort,
            show_completed,
        })
    }

    pub fn save_preferences(&self, options: &ViewOptions) -> Result<()> {
        self.store.put(SORT_KEY, &options.sort.to_string())?;
        self.store
            .put(SHOW_COMPLETED_KEY, &options.show_completed.to_string())?;
        debug!("Saved view preferences: {:?}", options);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;
    use crate::core::migrate::MIGRATED_NOTE;

    fn now() -> DateTime<Utc> {
        "2024-05-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_load_all_empty_store() {
        let repo = FundRepository::new(MemoryStore::new());
        let funds = repo
            .load_all(now(), &mut SequentialIds::new("c"))
            .unwrap();
        assert!(funds.is_empty());
    }

    #[test]
    fn test_load_all_migrates_and_saves_back() {
        let store = MemoryStore::new();
        store
            .put(
                FUNDS_KEY,
                r#"[{"id":"f1","name":"Laptop","targetAmount":1200,"targetDate":"2024-12-01","createdAt":"2024-01-10T08:00:00Z","color":"red","currentAmount":500}]"#,
            )
            .unwrap();
        let repo = FundRepository::new(store);
        let mut ids = SequentialIds::new("c");

        let funds = repo.load_all(now(), &mut ids).unwrap();
        assert_eq!(funds[0].contributions.len(), 1);
        assert_eq!(funds[0].contributions[0].note, MIGRATED_NOTE);

        let raw = repo.store.get(FUNDS_KEY).unwrap().unwrap();
        assert!(!raw.contains("currentAmount"));

        // Second load finds nothing left to migrate and keeps the same ids.
        let again = repo.load_all(now(), &mut ids).unwrap();
        assert_eq!(again, funds);
    }

    #[test]
    fn test_load_all_rejects_corrupt_data() {
        let store = MemoryStore::new();
        store.put(FUNDS_KEY, "{not json").unwrap();
        let repo = FundRepository::new(store);
        let result = repo.load_all(now(), &mut SequentialIds::new("c"));
        assert!(result.is_err());
    }

    #[test]
    fn test_preferences_round_trip() {
        let repo = FundRepository::new(MemoryStore::new());
        assert_eq!(repo.load_preferences().unwrap(), ViewOptions::default());

        let options = ViewOptions {
            sort: SortOrder::DateDesc,
            show_completed: true,
        };
        repo.save_preferences(&options).unwrap();
        assert_eq!(repo.load_preferences().unwrap(), options);
    }

    #[test]
    fn test_unknown_stored_sort_falls_back() {
        let store = MemoryStore::new();
        store.put(SORT_KEY, "by-color").unwrap();
        let repo = FundRepository::new(store);
        assert_eq!(repo.load_preferences().unwrap().sort, SortOrder::NameAsc);
    }
}
