//! In-memory fund list and every command that mutates it.
//!
//! The ledger is the only place where funds and contributions are created,
//! edited or removed. Callers load it from a repository, apply commands and
//! save [`FundLedger::funds`] back.
use crate::core::fund::{Contribution, Fund};
use crate::core::ids::IdProvider;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

pub const INITIAL_DEPOSIT_NOTE: &str = "Initial deposit";

#[derive(Debug, Clone)]
pub struct NewFund {
    pub name: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub color: String,
    /// Seed contribution recorded today when positive.
    pub initial_deposit: f64,
}

/// Editable fund fields. Contributions are never touched by a fund edit.
#[derive(Debug, Clone, Default)]
pub struct FundUpdate {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewContribution {
    pub amount: f64,
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContributionUpdate {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FundLedger {
    funds: Vec<Fund>,
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Fund name cannot be empty");
    }
    Ok(name.to_string())
}

fn validate_target(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("Target amount must be zero or more, got {amount}");
    }
    Ok(amount)
}

fn validate_contribution(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Contribution amount must be greater than zero, got {amount}");
    }
    Ok(amount)
}

impl FundLedger {
    pub fn new(funds: Vec<Fund>) -> Self {
        Self { funds }
    }

    pub fn funds(&self) -> &[Fund] {
        &self.funds
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Fund> {
        self.funds.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Fund> {
        self.funds
            .iter_mut()
            .find(|f| f.id == id)
            .with_context(|| format!("Fund not found: {id}"))
    }

    /// Finds a fund by exact id, falling back to a case-insensitive name match.
    pub fn resolve(&self, key: &str) -> Result<&Fund> {
        if let Some(fund) = self.get(key) {
            return Ok(fund);
        }

        let needle = key.trim().to_lowercase();
        let mut matches = self.funds.iter().filter(|f| f.name.to_lowercase() == needle);
        match (matches.next(), matches.next()) {
            (Some(fund), None) => Ok(fund),
            (Some(_), Some(_)) => bail!("More than one fund is named '{key}', use its id"),
            (None, _) => bail!("Fund not found: {key}"),
        }
    }

    pub fn add_fund(
        &mut self,
        new_fund: NewFund,
        now: DateTime<Utc>,
        ids: &mut dyn IdProvider,
    ) -> Result<&Fund> {
        let name = validate_name(&new_fund.name)?;
        let target_amount = validate_target(new_fund.target_amount)?;
        if !new_fund.initial_deposit.is_finite() || new_fund.initial_deposit < 0.0 {
            bail!(
                "Initial deposit must be zero or more, got {}",
                new_fund.initial_deposit
            );
        }

        let mut fund = Fund {
            id: ids.next_id(),
            name,
            target_amount,
            target_date: new_fund.target_date,
            created_at: now,
            color: new_fund.color,
            contributions: Vec::new(),
        };

        if new_fund.initial_deposit > 0.0 {
            fund.contributions.push(Contribution {
                id: ids.next_id(),
                amount: new_fund.initial_deposit,
                date: now.date_naive(),
                note: INITIAL_DEPOSIT_NOTE.to_string(),
            });
        }

        info!("Added fund '{}' ({})", fund.name, fund.id);
        let index = self.funds.len();
        self.funds.push(fund);
        Ok(&self.funds[index])
    }

    pub fn update_fund(&mut self, id: &str, update: FundUpdate) -> Result<&Fund> {
        let name = update.name.as_deref().map(validate_name).transpose()?;
        let target_amount = update.target_amount.map(validate_target).transpose()?;

        let fund = self.get_mut(id)?;
        if let Some(name) = name {
            fund.name = name;
        }
        if let Some(target_amount) = target_amount {
            fund.target_amount = target_amount;
        }
        if let Some(target_date) = update.target_date {
            fund.target_date = target_date;
        }
        if let Some(color) = update.color {
            fund.color = color;
        }

        info!("Updated fund '{}' ({})", fund.name, fund.id);
        Ok(fund)
    }

    /// Removes a fund together with its whole history.
    pub fn delete_fund(&mut self, id: &str) -> Result<Fund> {
        let index = self
            .funds
            .iter()
            .position(|f| f.id == id)
            .with_context(|| format!("Fund not found: {id}"))?;
        let fund = self.funds.remove(index);
        info!(
            "Deleted fund '{}' with {} contributions",
            fund.name,
            fund.contributions.len()
        );
        Ok(fund)
    }

    pub fn add_contribution(
        &mut self,
        fund_id: &str,
        new_contribution: NewContribution,
        ids: &mut dyn IdProvider,
    ) -> Result<&Contribution> {
        let amount = validate_contribution(new_contribution.amount)?;
        let fund = self.get_mut(fund_id)?;

        let id = ids.next_id();
        fund.contributions.push(Contribution {
            id: id.clone(),
            amount,
            date: new_contribution.date,
            note: new_contribution.note.unwrap_or_default(),
        });
        fund.sort_contributions();

        debug!("Added contribution {} of {} to fund {}", id, amount, fund_id);
        fund.contribution(&id)
            .with_context(|| format!("Contribution not found: {id}"))
    }

    pub fn update_contribution(
        &mut self,
        fund_id: &str,
        contribution_id: &str,
        update: ContributionUpdate,
    ) -> Result<&Contribution> {
        let amount = update.amount.map(validate_contribution).transpose()?;
        let fund = self.get_mut(fund_id)?;

        let contribution = fund
            .contributions
            .iter_mut()
            .find(|c| c.id == contribution_id)
            .with_context(|| format!("Contribution not found: {contribution_id}"))?;
        if let Some(amount) = amount {
            contribution.amount = amount;
        }
        if let Some(date) = update.date {
            contribution.date = date;
        }
        if let Some(note) = update.note {
            contribution.note = note;
        }
        fund.sort_contributions();

        debug!("Updated contribution {} of fund {}", contribution_id, fund_id);
        fund.contribution(contribution_id)
            .with_context(|| format!("Contribution not found: {contribution_id}"))
    }

    pub fn delete_contribution(
        &mut self,
        fund_id: &str,
        contribution_id: &str,
    ) -> Result<Contribution> {
        let fund = self.get_mut(fund_id)?;
        let index = fund
            .contributions
            .iter()
            .position(|c| c.id == contribution_id)
            .with_context(|| format!("Contribution not found: {contribution_id}"))?;

        debug!("Deleted contribution {} of fund {}", contribution_id, fund_id);
        Ok(fund.contributions.remove(index))
    }

    /// Swaps in a whole new fund list, as done by an import.
    pub fn replace_all(&mut self, funds: Vec<Fund>) {
        info!("Replacing {} funds with {}", self.funds.len(), funds.len());
        self.funds = funds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::current_amount;
    use crate::core::ids::SequentialIds;

    fn now() -> DateTime<Utc> {
        "2024-03-15T18:45:00Z".parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_fund(name: &str, initial_deposit: f64) -> NewFund {
        NewFund {
            name: name.to_string(),
            target_amount: 1000.0,
            target_date: date(2024, 12, 25),
            color: "#ec4899".to_string(),
            initial_deposit,
        }
    }

    fn deposit(amount: f64, day: NaiveDate) -> NewContribution {
        NewContribution {
            amount,
            date: day,
            note: None,
        }
    }

    fn ledger_with_fund() -> (FundLedger, SequentialIds, String) {
        let mut ledger = FundLedger::default();
        let mut ids = SequentialIds::new("id");
        let id = ledger
            .add_fund(new_fund("Christmas", 0.0), now(), &mut ids)
            .unwrap()
            .id
            .clone();
        (ledger, ids, id)
    }

    #[test]
    fn test_add_fund_with_initial_deposit() {
        let mut ledger = FundLedger::default();
        let mut ids = SequentialIds::new("id");
        let fund = ledger
            .add_fund(new_fund("  Christmas ", 150.0), now(), &mut ids)
            .unwrap();

        assert_eq!(fund.id, "id-1");
        assert_eq!(fund.name, "Christmas");
        assert_eq!(fund.created_at, now());
        assert_eq!(fund.contributions.len(), 1);
        assert_eq!(fund.contributions[0].id, "id-2");
        assert_eq!(fund.contributions[0].date, date(2024, 3, 15));
        assert_eq!(fund.contributions[0].note, INITIAL_DEPOSIT_NOTE);
        assert_eq!(current_amount(fund), 150.0);
    }

    #[test]
    fn test_add_fund_without_deposit_has_empty_history() {
        let (ledger, _, id) = ledger_with_fund();
        assert!(ledger.get(&id).unwrap().contributions.is_empty());
    }

    #[test]
    fn test_add_fund_validation() {
        let mut ledger = FundLedger::default();
        let mut ids = SequentialIds::new("id");

        assert!(ledger.add_fund(new_fund("   ", 0.0), now(), &mut ids).is_err());
        assert!(ledger.add_fund(new_fund("Car", -5.0), now(), &mut ids).is_err());

        let mut negative_target = new_fund("Car", 0.0);
        negative_target.target_amount = -1.0;
        assert!(ledger.add_fund(negative_target, now(), &mut ids).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_update_fund_keeps_history() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        ledger
            .add_contribution(&id, deposit(100.0, date(2024, 3, 1)), &mut ids)
            .unwrap();

        let fund = ledger
            .update_fund(
                &id,
                FundUpdate {
                    name: Some("Holidays".to_string()),
                    target_amount: Some(2000.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(fund.name, "Holidays");
        assert_eq!(fund.target_amount, 2000.0);
        assert_eq!(fund.target_date, date(2024, 12, 25));
        assert_eq!(fund.color, "#ec4899");
        assert_eq!(fund.contributions.len(), 1);
        assert_eq!(fund.created_at, now());
    }

    #[test]
    fn test_update_fund_rejects_blank_name() {
        let (mut ledger, _, id) = ledger_with_fund();
        let result = ledger.update_fund(
            &id,
            FundUpdate {
                name: Some(" ".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(ledger.get(&id).unwrap().name, "Christmas");
    }

    #[test]
    fn test_delete_fund_cascades() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        ledger
            .add_contribution(&id, deposit(100.0, date(2024, 3, 1)), &mut ids)
            .unwrap();

        let removed = ledger.delete_fund(&id).unwrap();
        assert_eq!(removed.contributions.len(), 1);
        assert!(ledger.is_empty());
        assert!(ledger.delete_fund(&id).is_err());
    }

    #[test]
    fn test_contributions_sorted_newest_first() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        for day in [5, 20, 1, 20] {
            ledger
                .add_contribution(&id, deposit(10.0, date(2024, 2, day)), &mut ids)
                .unwrap();
        }

        let dates: Vec<_> = ledger
            .get(&id)
            .unwrap()
            .contributions
            .iter()
            .map(|c| (c.date, c.id.clone()))
            .collect();
        assert_eq!(
            dates,
            vec![
                (date(2024, 2, 20), "id-3".to_string()),
                (date(2024, 2, 20), "id-5".to_string()),
                (date(2024, 2, 5), "id-2".to_string()),
                (date(2024, 2, 1), "id-4".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_contribution_rejects_non_positive_amounts() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        assert!(
            ledger
                .add_contribution(&id, deposit(-50.0, date(2024, 3, 1)), &mut ids)
                .is_err()
        );
        assert!(
            ledger
                .add_contribution(&id, deposit(0.0, date(2024, 3, 1)), &mut ids)
                .is_err()
        );
        assert!(
            ledger
                .add_contribution("missing", deposit(5.0, date(2024, 3, 1)), &mut ids)
                .is_err()
        );
        assert!(ledger.get(&id).unwrap().contributions.is_empty());
    }

    #[test]
    fn test_update_contribution_resorts() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        let first = ledger
            .add_contribution(&id, deposit(10.0, date(2024, 1, 10)), &mut ids)
            .unwrap()
            .id
            .clone();
        ledger
            .add_contribution(&id, deposit(20.0, date(2024, 2, 10)), &mut ids)
            .unwrap();

        let updated = ledger
            .update_contribution(
                &id,
                &first,
                ContributionUpdate {
                    amount: Some(15.0),
                    date: Some(date(2024, 3, 1)),
                    note: Some("Moved".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 15.0);
        assert_eq!(updated.note, "Moved");

        let fund = ledger.get(&id).unwrap();
        assert_eq!(fund.contributions[0].id, first);
        assert_eq!(current_amount(fund), 35.0);
    }

    #[test]
    fn test_delete_contribution() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        let contribution_id = ledger
            .add_contribution(&id, deposit(10.0, date(2024, 1, 10)), &mut ids)
            .unwrap()
            .id
            .clone();

        let removed = ledger.delete_contribution(&id, &contribution_id).unwrap();
        assert_eq!(removed.amount, 10.0);
        assert!(ledger.get(&id).unwrap().contributions.is_empty());
        assert!(ledger.delete_contribution(&id, &contribution_id).is_err());
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let (mut ledger, mut ids, id) = ledger_with_fund();
        assert_eq!(ledger.resolve(&id).unwrap().id, id);
        assert_eq!(ledger.resolve("christmas").unwrap().id, id);
        assert!(ledger.resolve("Birthday").is_err());

        ledger
            .add_fund(new_fund("CHRISTMAS", 0.0), now(), &mut ids)
            .unwrap();
        let err = ledger.resolve("Christmas").unwrap_err();
        assert!(err.to_string().contains("More than one fund"));
    }

    #[test]
    fn test_replace_all() {
        let (mut ledger, _, _) = ledger_with_fund();
        ledger.replace_all(Vec::new());
        assert!(ledger.is_empty());
    }
}
