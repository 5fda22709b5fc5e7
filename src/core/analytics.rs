//! Derives progress, pace and status figures from a fund's history.
//!
//! Every function here is pure: the reference instant is always passed in by
//! the caller, so results only depend on `(fund, now)`. Calendar dates are
//! interpreted as midnight UTC.
use crate::core::fund::Fund;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Average month length used for every month-based calculation.
pub const DAYS_PER_MONTH: f64 = 30.44;
/// Average year length used when humanizing long durations.
pub const DAYS_PER_YEAR: f64 = 365.25;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const ON_TRACK_TOLERANCE: f64 = 5.0;
const BEHIND_TOLERANCE: f64 = 20.0;

/// Qualitative health of a fund relative to a linear savings pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundStatus {
    Complete,
    Overdue,
    OnTrack,
    Behind,
    AtRisk,
}

impl Display for FundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FundStatus::Complete => "complete",
                FundStatus::Overdue => "overdue",
                FundStatus::OnTrack => "on-track",
                FundStatus::Behind => "behind",
                FundStatus::AtRisk => "at-risk",
            }
        )
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days from `from` to `to`, counting any partial day as a full one.
fn ceil_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

/// Sum of every contribution. A fund without history holds nothing.
pub fn current_amount(fund: &Fund) -> f64 {
    fund.contributions.iter().map(|c| c.amount).sum()
}

/// Percentage of the target saved so far, capped at 100.
///
/// A fund with a zero (or negative) target is considered fully funded.
pub fn progress(fund: &Fund) -> f64 {
    if fund.target_amount <= 0.0 {
        return 100.0;
    }
    (current_amount(fund) / fund.target_amount * 100.0).min(100.0)
}

/// Days left until the target date, measured from the start of `now`'s day.
/// Never negative.
pub fn days_remaining(fund: &Fund, now: DateTime<Utc>) -> i64 {
    let today = midnight(now.date_naive());
    ceil_days(today, midnight(fund.target_date)).max(0)
}

/// Months left until the target date, measured from the exact instant `now`.
/// Never negative.
pub fn months_remaining(fund: &Fund, now: DateTime<Utc>) -> i64 {
    let days = ceil_days(now, midnight(fund.target_date));
    ((days as f64 / DAYS_PER_MONTH).ceil() as i64).max(0)
}

/// Amount to set aside each month to hit the target on time.
///
/// Once the target date is reached the whole outstanding balance is due and
/// the result is never negative. Before that, an over-funded fund yields a
/// negative figure; callers decide how to present it.
pub fn monthly_contribution(fund: &Fund, now: DateTime<Utc>) -> f64 {
    let remaining = fund.target_amount - current_amount(fund);
    let months = months_remaining(fund, now);
    if months <= 0 {
        return remaining.max(0.0);
    }
    remaining / months as f64
}

/// Formats a day count as a compact label such as `12 days`, `3m 4d` or `2y 5m`.
pub fn humanize_duration(days: i64) -> String {
    if days <= 0 {
        return "0 days".to_string();
    }
    if days < 30 {
        let suffix = if days != 1 { "s" } else { "" };
        return format!("{days} day{suffix}");
    }

    let days_f = days as f64;
    if days < 365 {
        let months = (days_f / DAYS_PER_MONTH).floor() as i64;
        let remaining_days = (days_f % DAYS_PER_MONTH).round() as i64;
        if remaining_days == 0 {
            let suffix = if months != 1 { "s" } else { "" };
            return format!("{months} mon{suffix}");
        }
        return format!("{months}m {remaining_days}d");
    }

    let years = (days_f / DAYS_PER_YEAR).floor() as i64;
    let months = ((days_f % DAYS_PER_YEAR) / DAYS_PER_MONTH).round() as i64;
    match months {
        0 => format!("{years}y"),
        // rounding carried into a full year
        12 => format!("{}y", years + 1),
        _ => format!("{years}y {months}m"),
    }
}

/// Classifies a fund against a straight-line savings pace from its creation
/// to its target date.
///
/// Completion wins over everything else, so a fully funded fund is never
/// reported as overdue.
pub fn status(fund: &Fund, now: DateTime<Utc>) -> FundStatus {
    let progress = progress(fund);
    if progress >= 100.0 {
        return FundStatus::Complete;
    }

    let days_remaining = days_remaining(fund, now);
    if days_remaining <= 0 {
        return FundStatus::Overdue;
    }

    let total_days = ceil_days(fund.created_at, midnight(fund.target_date));
    let expected_progress = if total_days > 0 {
        (total_days - days_remaining) as f64 / total_days as f64 * 100.0
    } else {
        100.0
    };

    if progress >= expected_progress - ON_TRACK_TOLERANCE {
        FundStatus::OnTrack
    } else if progress >= expected_progress - BEHIND_TOLERANCE {
        FundStatus::Behind
    } else {
        FundStatus::AtRisk
    }
}

/// All derived figures of one fund at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct FundSnapshot {
    pub current_amount: f64,
    pub progress: f64,
    /// Target minus saved; negative when the fund is over-funded.
    pub remaining_amount: f64,
    pub monthly_contribution: f64,
    pub days_remaining: i64,
    pub time_left: String,
    pub status: FundStatus,
    pub contribution_count: usize,
}

impl FundSnapshot {
    pub fn capture(fund: &Fund, now: DateTime<Utc>) -> Self {
        let current_amount = current_amount(fund);
        let days_remaining = days_remaining(fund, now);
        FundSnapshot {
            current_amount,
            progress: progress(fund),
            remaining_amount: fund.target_amount - current_amount,
            monthly_contribution: monthly_contribution(fund, now),
            days_remaining,
            time_left: humanize_duration(days_remaining),
            status: status(fund, now),
            contribution_count: fund.contributions.len(),
        }
    }
}
