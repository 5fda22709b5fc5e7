//! Terminal presentation of funds and their history.

pub mod history;
pub mod setup;
pub mod summary;
pub mod ui;
