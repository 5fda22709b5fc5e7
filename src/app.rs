//! Runs one command against the stored fund list.
use crate::cli::{history, summary, ui};
use crate::core::config::AppConfig;
use crate::core::ledger::{ContributionUpdate, FundUpdate, NewContribution, NewFund};
use crate::core::view::{SortOrder, ViewOptions};
use crate::core::{Clock, FundLedger, IdProvider, analytics};
use crate::store::{FundRepository, KeyValueStore, interchange};
use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Summary {
        sort: Option<SortOrder>,
        show_completed: Option<bool>,
    },
    Add {
        name: String,
        target_amount: f64,
        target_date: Option<NaiveDate>,
        initial_deposit: f64,
        color: Option<String>,
    },
    Edit {
        fund: String,
        update: FundUpdate,
    },
    Delete {
        fund: String,
        assume_yes: bool,
    },
    Deposit {
        fund: String,
        amount: f64,
        date: Option<NaiveDate>,
        note: Option<String>,
    },
    EditDeposit {
        fund: String,
        contribution: String,
        update: ContributionUpdate,
    },
    DeleteDeposit {
        fund: String,
        contribution: String,
        assume_yes: bool,
    },
    History {
        fund: String,
    },
    Export {
        output: Option<PathBuf>,
    },
    Import {
        path: PathBuf,
        assume_yes: bool,
    },
}

/// Asks the user to approve a destructive action unless `assume_yes` is set.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let approved = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;
    Ok(approved)
}

pub struct App<S: KeyValueStore> {
    config: AppConfig,
    repo: FundRepository<S>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdProvider>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(
        config: AppConfig,
        store: S,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdProvider>,
    ) -> Self {
        Self {
            config,
            repo: FundRepository::new(store),
            clock,
            ids,
        }
    }

    /// Executes `command` and returns the text to show the user.
    pub fn execute(&mut self, command: AppCommand) -> Result<String> {
        let now = self.clock.now();
        let funds = self.repo.load_all(now, self.ids.as_mut())?;
        let mut ledger = FundLedger::new(funds);
        let symbol = self.config.currency_symbol.clone();
        debug!("Executing {:?}", command);

        match command {
            AppCommand::Summary {
                sort,
                show_completed,
            } => {
                let mut options = self.repo.load_preferences()?;
                if sort.is_some() || show_completed.is_some() {
                    options = ViewOptions {
                        sort: sort.unwrap_or(options.sort),
                        show_completed: show_completed.unwrap_or(options.show_completed),
                    };
                    self.repo.save_preferences(&options)?;
                }
                Ok(summary::render(ledger.funds(), &options, now, &symbol))
            }
            AppCommand::Add {
                name,
                target_amount,
                target_date,
                initial_deposit,
                color,
            } => {
                let target_date = match target_date {
                    Some(date) => date,
                    None => now
                        .date_naive()
                        .checked_add_months(Months::new(self.config.default_target_months))
                        .context("Default target date is out of range")?,
                };
                let new_fund = NewFund {
                    name,
                    target_amount,
                    target_date,
                    color: color.unwrap_or_else(|| self.config.default_color.clone()),
                    initial_deposit,
                };
                let fund = ledger.add_fund(new_fund, now, self.ids.as_mut())?;
                let message = format!(
                    "Added fund '{}' ({}), target {} by {}",
                    fund.name,
                    fund.id,
                    ui::format_currency(fund.target_amount, &symbol),
                    ui::format_date(fund.target_date)
                );
                self.repo.save_all(ledger.funds())?;
                Ok(message)
            }
            AppCommand::Edit { fund, update } => {
                let id = ledger.resolve(&fund)?.id.clone();
                let fund = ledger.update_fund(&id, update)?;
                let message = format!("Updated fund '{}'", fund.name);
                self.repo.save_all(ledger.funds())?;
                Ok(message)
            }
            AppCommand::Delete { fund, assume_yes } => {
                let target = ledger.resolve(&fund)?;
                let (id, name) = (target.id.clone(), target.name.clone());
                let prompt = format!(
                    "Delete '{}' and its {}?",
                    name,
                    ui::contribution_count_label(target.contributions.len())
                );
                if !confirm(&prompt, assume_yes)? {
                    return Ok("Nothing deleted.".to_string());
                }
                ledger.delete_fund(&id)?;
                self.repo.save_all(ledger.funds())?;
                Ok(format!("Deleted fund '{name}'"))
            }
            AppCommand::Deposit {
                fund,
                amount,
                date,
                note,
            } => {
                let id = ledger.resolve(&fund)?.id.clone();
                let new_contribution = NewContribution {
                    amount,
                    date: date.unwrap_or_else(|| now.date_naive()),
                    note,
                };
                let contribution =
                    ledger.add_contribution(&id, new_contribution, self.ids.as_mut())?;
                let mut message = format!(
                    "Recorded {} on {} ({})",
                    ui::format_currency(contribution.amount, &symbol),
                    ui::format_date(contribution.date),
                    contribution.id
                );
                if let Some(fund) = ledger.get(&id) {
                    message.push_str(&format!(
                        "\n'{}' is now at {}% ({})",
                        fund.name,
                        analytics::progress(fund).round(),
                        analytics::status(fund, now)
                    ));
                }
                self.repo.save_all(ledger.funds())?;
                Ok(message)
            }
            AppCommand::EditDeposit {
                fund,
                contribution,
                update,
            } => {
                let id = ledger.resolve(&fund)?.id.clone();
                let updated = ledger.update_contribution(&id, &contribution, update)?;
                let message = format!(
                    "Updated contribution {}: {} on {}",
                    updated.id,
                    ui::format_currency(updated.amount, &symbol),
                    ui::format_date(updated.date)
                );
                self.repo.save_all(ledger.funds())?;
                Ok(message)
            }
            AppCommand::DeleteDeposit {
                fund,
                contribution,
                assume_yes,
            } => {
                let id = ledger.resolve(&fund)?.id.clone();
                if !confirm("Delete this contribution?", assume_yes)? {
                    return Ok("Nothing deleted.".to_string());
                }
                let removed = ledger.delete_contribution(&id, &contribution)?;
                self.repo.save_all(ledger.funds())?;
                Ok(format!(
                    "Deleted contribution of {} from {}",
                    ui::format_currency(removed.amount, &symbol),
                    ui::format_date(removed.date)
                ))
            }
            AppCommand::History { fund } => {
                let fund = ledger.resolve(&fund)?;
                Ok(history::render(fund, &symbol))
            }
            AppCommand::Export { output } => {
                let path = output
                    .unwrap_or_else(|| PathBuf::from(interchange::backup_file_name(now.date_naive())));
                interchange::export_funds(ledger.funds(), &path)?;
                Ok(format!(
                    "Exported {} funds to {}",
                    ledger.funds().len(),
                    path.display()
                ))
            }
            AppCommand::Import { path, assume_yes } => {
                let imported = interchange::read_backup(&path, now, self.ids.as_mut())?;
                let prompt = format!(
                    "Import {} funds? This will REPLACE all current data on this device.",
                    imported.len()
                );
                if !confirm(&prompt, assume_yes)? {
                    info!("Import of {} cancelled", path.display());
                    return Ok("Import cancelled, existing data left untouched.".to_string());
                }
                let count = imported.len();
                ledger.replace_all(imported);
                self.repo.save_all(ledger.funds())?;
                Ok(format!("Imported {count} funds from {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, SequentialIds};
    use crate::store::MemoryStore;

    fn app() -> App<MemoryStore> {
        let now = "2024-04-01T09:00:00Z".parse().unwrap();
        App::new(
            AppConfig::default(),
            MemoryStore::new(),
            Box::new(FixedClock(now)),
            Box::new(SequentialIds::new("id")),
        )
    }

    fn add(app: &mut App<MemoryStore>, name: &str) -> String {
        app.execute(AppCommand::Add {
            name: name.to_string(),
            target_amount: 1200.0,
            target_date: None,
            initial_deposit: 0.0,
            color: None,
        })
        .unwrap()
    }

    #[test]
    fn test_add_uses_configured_defaults() {
        let mut app = app();
        let message = add(&mut app, "Insurance");
        assert!(message.contains("Oct 1, 2024"));
        assert!(message.contains("₱1,200"));

        let funds = app
            .repo
            .load_all(app.clock.now(), app.ids.as_mut())
            .unwrap();
        assert_eq!(funds[0].color, "#6366f1");
    }

    #[test]
    fn test_deposit_reports_progress() {
        let mut app = app();
        add(&mut app, "Insurance");
        let message = app
            .execute(AppCommand::Deposit {
                fund: "insurance".to_string(),
                amount: 300.0,
                date: None,
                note: Some("April".to_string()),
            })
            .unwrap();
        assert!(message.contains("Recorded ₱300 on Apr 1, 2024"));
        assert!(message.contains("25%"));
    }

    #[test]
    fn test_delete_requires_existing_fund() {
        let mut app = app();
        let result = app.execute(AppCommand::Delete {
            fund: "nothing".to_string(),
            assume_yes: true,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_persists_preferences() {
        let mut app = app();
        add(&mut app, "Insurance");
        app.execute(AppCommand::Summary {
            sort: Some(SortOrder::DateDesc),
            show_completed: None,
        })
        .unwrap();

        let options = app.repo.load_preferences().unwrap();
        assert_eq!(options.sort, SortOrder::DateDesc);
        assert!(!options.show_completed);
    }
}
