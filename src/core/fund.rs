//! Fund and contribution records as they are stored and exchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single deposit recorded against a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
}

/// A savings goal with a target amount and a date it should be funded by.
///
/// The saved balance is never stored; it is always derived from
/// `contributions` (see [`crate::core::analytics::current_amount`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

impl Fund {
    pub fn contribution(&self, id: &str) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.id == id)
    }

    /// Re-orders the history newest first. Contributions on the same date keep
    /// their relative order.
    pub fn sort_contributions(&mut self) {
        self.contributions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

/// The permissive shape accepted from storage and import files.
///
/// Records written before contributions were tracked carry a scalar
/// `currentAmount` and no `contributions` field at all. Those are turned into
/// [`Fund`] values by [`crate::core::migrate::migrate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFund {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<Vec<Contribution>>,
}

impl From<Fund> for StoredFund {
    fn from(fund: Fund) -> Self {
        StoredFund {
            id: fund.id,
            name: fund.name,
            target_amount: fund.target_amount,
            target_date: fund.target_date,
            created_at: Some(fund.created_at),
            color: fund.color,
            current_amount: None,
            contributions: Some(fund.contributions),
        }
    }
}
