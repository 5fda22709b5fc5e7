use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use sinkfund::AppCommand;
use sinkfund::core::SortOrder;
use sinkfund::core::ledger::{ContributionUpdate, FundUpdate};
use sinkfund::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display totals and the list of funds
    Summary {
        /// Sort order: name-asc, name-desc, date-asc or date-desc
        #[arg(short, long)]
        sort: Option<SortOrder>,
        /// Include fully funded goals
        #[arg(long, conflicts_with = "hide_completed")]
        show_completed: bool,
        /// Hide fully funded goals
        #[arg(long)]
        hide_completed: bool,
    },
    /// Create a new sinking fund
    Add {
        /// Display name of the fund
        name: String,
        /// Amount to save
        #[arg(short, long)]
        target: f64,
        /// Date the fund should be complete by (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Amount already set aside, recorded as the first contribution
        #[arg(short, long, default_value_t = 0.0)]
        initial: f64,
        /// Display color tag
        #[arg(long)]
        color: Option<String>,
    },
    /// Change a fund's name, target or color
    Edit {
        /// Fund id or name
        fund: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<f64>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a fund and its history
    Delete {
        /// Fund id or name
        fund: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Record a contribution to a fund
    Deposit {
        /// Fund id or name
        fund: String,
        amount: f64,
        /// Date of the contribution, defaults to today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Change a recorded contribution
    EditDeposit {
        /// Fund id or name
        fund: String,
        /// Contribution id, as listed by `history`
        contribution: String,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Remove a recorded contribution
    DeleteDeposit {
        /// Fund id or name
        fund: String,
        /// Contribution id, as listed by `history`
        contribution: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the contribution history of a fund
    History {
        /// Fund id or name
        fund: String,
    },
    /// Write all funds to a JSON backup file
    Export {
        /// Output file, defaults to sinking-funds-backup-<date>.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all funds with the contents of a JSON backup file
    Import {
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Summary {
                sort,
                show_completed,
                hide_completed,
            } => AppCommand::Summary {
                sort,
                show_completed: match (show_completed, hide_completed) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            },
            Commands::Add {
                name,
                target,
                date,
                initial,
                color,
            } => AppCommand::Add {
                name,
                target_amount: target,
                target_date: date,
                initial_deposit: initial,
                color,
            },
            Commands::Edit {
                fund,
                name,
                target,
                date,
                color,
            } => AppCommand::Edit {
                fund,
                update: FundUpdate {
                    name,
                    target_amount: target,
                    target_date: date,
                    color,
                },
            },
            Commands::Delete { fund, yes } => AppCommand::Delete {
                fund,
                assume_yes: yes,
            },
            Commands::Deposit {
                fund,
                amount,
                date,
                note,
            } => AppCommand::Deposit {
                fund,
                amount,
                date,
                note,
            },
            Commands::EditDeposit {
                fund,
                contribution,
                amount,
                date,
                note,
            } => AppCommand::EditDeposit {
                fund,
                contribution,
                update: ContributionUpdate { amount, date, note },
            },
            Commands::DeleteDeposit {
                fund,
                contribution,
                yes,
            } => AppCommand::DeleteDeposit {
                fund,
                contribution,
                assume_yes: yes,
            },
            Commands::History { fund } => AppCommand::History { fund },
            Commands::Export { output } => AppCommand::Export { output },
            Commands::Import { path, yes } => AppCommand::Import {
                path,
                assume_yes: yes,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sinkfund::cli::setup::setup(),
        Some(cmd) => sinkfund::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
