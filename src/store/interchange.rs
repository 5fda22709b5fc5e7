//! JSON backup files: exporting the fund list and reading it back in.
use crate::core::fund::{Fund, StoredFund};
use crate::core::ids::IdProvider;
use crate::core::migrate::migrate;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default name of a backup written on `today`.
pub fn backup_file_name(today: NaiveDate) -> String {
    format!("sinking-funds-backup-{}.json", today.format("%Y-%m-%d"))
}

pub fn export_funds(funds: &[Fund], path: &Path) -> Result<()> {
    if funds.is_empty() {
        bail!("No data to export.");
    }

    let data = serde_json::to_string_pretty(funds).context("Failed to serialize funds")?;
    fs::write(path, data)
        .with_context(|| format!("Failed to write backup file to {}", path.display()))?;
    info!("Exported {} funds to {}", funds.len(), path.display());
    Ok(())
}

/// Parses a backup file's contents into migrated funds.
///
/// Nothing is stored here; replacing the current data is left to the caller
/// once the user has confirmed it.
pub fn parse_backup(
    contents: &str,
    now: DateTime<Utc>,
    ids: &mut dyn IdProvider,
) -> Result<Vec<Fund>> {
    if contents.trim().is_empty() {
        bail!("File is empty");
    }

    let value: serde_json::Value = serde_json::from_str(contents)
        .context("The file might be corrupted or in the wrong format")?;
    if !value.is_array() {
        bail!("Invalid data format: Expected an array of funds.");
    }

    let records: Vec<StoredFund> =
        serde_json::from_value(value).context("Invalid fund record in backup")?;
    debug!("Parsed {} fund records from backup", records.len());
    Ok(migrate(records, now, ids).funds)
}

pub fn read_backup(path: &Path, now: DateTime<Utc>, ids: &mut dyn IdProvider) -> Result<Vec<Fund>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read backup file: {}", path.display()))?;
    parse_backup(&contents, now, ids)
        .with_context(|| format!("Import failed for {}", path.display()))
}
