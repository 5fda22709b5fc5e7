//! Core business logic: the fund model, the derivation engine and the
//! ledger that owns the fund list.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod fund;
pub mod ids;
pub mod ledger;
pub mod log;
pub mod migrate;
pub mod view;

// Re-export main types for cleaner imports
pub use analytics::{FundSnapshot, FundStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use fund::{Contribution, Fund, StoredFund};
pub use ids::{IdProvider, SequentialIds, UuidIds};
pub use ledger::FundLedger;
pub use view::{DashboardStats, SortOrder, ViewOptions};
