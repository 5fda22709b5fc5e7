use super::KeyValueStore;
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "funds";

/// Store backed by an on-disk fjall keyspace.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open fund store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open fund partition")?;
        debug!("Opened fund store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.partition.get(key)? else {
            debug!("Store MISS for key: {key}");
            return Ok(None);
        };
        debug!("Store HIT for key: {key}");
        let value = String::from_utf8(value.to_vec())
            .with_context(|| format!("Stored value for {key} is not valid UTF-8"))?;
        Ok(Some(value))
    }

    /// Writes the value and syncs the journal before returning.
    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key.as_bytes(), value.as_bytes())?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store PUT for key: {key}");
        Ok(())
    }
}
