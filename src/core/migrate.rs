//! Upgrades stored records to the contribution-history shape.
use crate::core::fund::{Contribution, Fund, StoredFund};
use crate::core::ids::IdProvider;
use chrono::{DateTime, Utc};
use tracing::debug;

pub const MIGRATED_NOTE: &str = "Initial balance (migrated)";

#[derive(Debug)]
pub struct Migration {
    pub funds: Vec<Fund>,
    /// Whether any record had to be rewritten.
    pub changed: bool,
}

/// Converts stored records into funds.
///
/// A legacy record with a positive `currentAmount` and no history gets one
/// synthetic contribution for that amount, dated on the day the fund was
/// created. Records that already carry a `contributions` field, even an empty
/// one, are kept as they are, so running this twice changes nothing.
pub fn migrate(
    records: Vec<StoredFund>,
    now: DateTime<Utc>,
    ids: &mut dyn IdProvider,
) -> Migration {
    let mut changed = false;

    let funds = records
        .into_iter()
        .map(|record| {
            let created_at = record.created_at.unwrap_or_else(|| {
                debug!("Fund {} has no creation time, stamping {}", record.id, now);
                changed = true;
                now
            });

            let contributions = match (record.contributions, record.current_amount) {
                (Some(contributions), _) => contributions,
                (None, Some(amount)) => {
                    debug!("Migrating balance {} of fund {}", amount, record.id);
                    changed = true;
                    if amount > 0.0 {
                        vec![Contribution {
                            id: ids.next_id(),
                            amount,
                            date: created_at.date_naive(),
                            note: MIGRATED_NOTE.to_string(),
                        }]
                    } else {
                        Vec::new()
                    }
                }
                (None, None) => {
                    changed = true;
                    Vec::new()
                }
            };

            Fund {
                id: record.id,
                name: record.name,
                target_amount: record.target_amount,
                target_date: record.target_date,
                created_at,
                color: record.color,
                contributions,
            }
        })
        .collect();

    Migration { funds, changed }
}
