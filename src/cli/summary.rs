use super::ui;
use crate::core::view::{self, DashboardStats, ViewOptions};
use crate::core::{Fund, FundSnapshot};
use chrono::{DateTime, Utc};
use comfy_table::Cell;

impl DashboardStats {
    pub fn display(&self, currency_symbol: &str) -> String {
        let line = |label: &str, value: String| {
            format!(
                "{}: {}\n",
                ui::style_text(label, ui::StyleType::TotalLabel),
                value
            )
        };

        let mut output = String::new();
        output.push_str(&line(
            "Total Saved",
            ui::style_text(
                &ui::format_currency(self.total_saved, currency_symbol),
                ui::StyleType::TotalValue,
            ),
        ));
        output.push_str(&line(
            "Funds",
            format!(
                "{} ({} in progress, {} completed)",
                self.fund_count, self.in_progress_count, self.completed_count
            ),
        ));
        output.push_str(&line(
            "Monthly Goal",
            ui::format_currency(self.monthly_total, currency_symbol),
        ));
        output
    }
}

/// Renders the fund list as a table, one row per fund.
pub fn funds_table(funds: &[&Fund], now: DateTime<Utc>, currency_symbol: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Fund"),
        ui::header_cell("Progress"),
        ui::header_cell("Saved"),
        ui::header_cell("Target"),
        ui::header_cell("Monthly Goal"),
        ui::header_cell("Time Left"),
        ui::header_cell("Target Date"),
        ui::header_cell("Remaining"),
        ui::header_cell("Status"),
        ui::header_cell("History"),
    ]);

    for fund in funds {
        let snapshot = FundSnapshot::capture(fund, now);
        // an over-funded fund needs nothing more each month
        let monthly = snapshot.monthly_contribution.max(0.0);

        table.add_row(vec![
            Cell::new(&fund.name),
            ui::progress_cell(snapshot.progress),
            ui::amount_cell(ui::format_currency(snapshot.current_amount, currency_symbol)),
            ui::amount_cell(ui::format_currency(fund.target_amount, currency_symbol)),
            ui::status_colored_cell(ui::format_currency(monthly, currency_symbol), snapshot.status),
            ui::status_colored_cell(snapshot.time_left.clone(), snapshot.status),
            Cell::new(ui::format_date(fund.target_date)),
            ui::amount_cell(ui::format_currency(snapshot.remaining_amount, currency_symbol)),
            ui::status_cell(snapshot.status),
            Cell::new(ui::contribution_count_label(snapshot.contribution_count)),
        ]);
    }

    table.to_string()
}

/// Dashboard totals followed by the visible funds.
pub fn render(
    funds: &[Fund],
    options: &ViewOptions,
    now: DateTime<Utc>,
    currency_symbol: &str,
) -> String {
    if funds.is_empty() {
        return "No sinking funds yet. Create one with `sinkfund add`.".to_string();
    }

    let stats = DashboardStats::compute(funds, now);
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Sinking Funds", ui::StyleType::Title)
    );
    output.push_str(&stats.display(currency_symbol));
    output.push('\n');

    let visible = view::visible_funds(funds, options);
    if visible.is_empty() {
        output.push_str(&ui::style_text(
            "All funds are complete. Use --show-completed to list them.",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push_str(&funds_table(&visible, now, currency_symbol));
    }

    output
}
