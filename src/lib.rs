pub mod app;
pub mod cli;
pub mod core;
pub mod store;

pub use app::{App, AppCommand};

use crate::core::config::AppConfig;
use crate::core::{SystemClock, UuidIds};
use crate::store::DiskStore;
use anyhow::Result;
use tracing::{debug, info};

/// Loads the configuration, opens the fund store and runs `command`,
/// printing its output.
pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Sinking funds tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = DiskStore::open(&config.data_dir()?)?;
    let mut app = App::new(config, store, Box::new(SystemClock), Box::new(UuidIds));
    let output = app.execute(command)?;
    println!("{output}");
    Ok(())
}
