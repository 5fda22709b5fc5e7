//! Sorting, filtering and dashboard totals for the fund list.
use crate::core::analytics::{current_amount, monthly_contribution, progress};
use crate::core::fund::Fund;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::NameAsc => "name-asc",
                SortOrder::NameDesc => "name-desc",
                SortOrder::DateAsc => "date-asc",
                SortOrder::DateDesc => "date-desc",
            }
        )
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "date-desc" => Ok(SortOrder::DateDesc),
            _ => Err(anyhow!(
                "Invalid sort order: {s} (expected name-asc, name-desc, date-asc or date-desc)"
            )),
        }
    }
}

impl SortOrder {
    fn compare(&self, a: &Fund, b: &Fund) -> Ordering {
        match self {
            SortOrder::NameAsc => compare_names(a, b),
            SortOrder::NameDesc => compare_names(b, a),
            SortOrder::DateAsc => a.target_date.cmp(&b.target_date),
            SortOrder::DateDesc => b.target_date.cmp(&a.target_date),
        }
    }
}

fn compare_names(a: &Fund, b: &Fund) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// How the fund list is presented. Persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub sort: SortOrder,
    pub show_completed: bool,
}

/// Funds to display, in display order. Fully funded funds are hidden unless
/// `show_completed` is set.
pub fn visible_funds<'a>(funds: &'a [Fund], options: &ViewOptions) -> Vec<&'a Fund> {
    let mut visible: Vec<&Fund> = funds
        .iter()
        .filter(|fund| options.show_completed || progress(fund) < 100.0)
        .collect();
    visible.sort_by(|a, b| options.sort.compare(a, b));
    visible
}

/// Totals shown above the fund list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_saved: f64,
    pub fund_count: usize,
    pub in_progress_count: usize,
    pub completed_count: usize,
    /// Sum of the monthly contributions still needed by unfinished funds.
    pub monthly_total: f64,
}

impl DashboardStats {
    pub fn compute(funds: &[Fund], now: DateTime<Utc>) -> Self {
        let mut stats = DashboardStats {
            fund_count: funds.len(),
            ..Default::default()
        };

        for fund in funds {
            let saved = current_amount(fund);
            stats.total_saved += saved;
            if fund.target_amount - saved > 0.0 {
                stats.in_progress_count += 1;
                stats.monthly_total += monthly_contribution(fund, now);
            } else {
                stats.completed_count += 1;
            }
        }

        stats
    }
}
