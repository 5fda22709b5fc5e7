use crate::core::FundStatus;
use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned cell for numbers and amounts.
pub fn amount_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Formats an amount with the currency symbol, no decimals and thousands
/// separators, e.g. `-₱12,345`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{symbol}{grouped}")
}

/// Formats a calendar date as `Jan 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn status_color(status: FundStatus) -> Color {
    match status {
        FundStatus::Complete | FundStatus::OnTrack => Color::Green,
        FundStatus::Behind => Color::Yellow,
        FundStatus::Overdue | FundStatus::AtRisk => Color::Red,
    }
}

/// Creates a cell showing the fund status, colored by severity.
pub fn status_cell(status: FundStatus) -> Cell {
    Cell::new(status.to_string())
        .fg(status_color(status))
        .add_attribute(Attribute::Bold)
}

/// Creates a cell whose text takes the color of the fund status.
pub fn status_colored_cell(text: String, status: FundStatus) -> Cell {
    Cell::new(text)
        .fg(status_color(status))
        .set_alignment(CellAlignment::Right)
}

/// Creates a cell with the progress percentage, green once complete.
pub fn progress_cell(progress: f64) -> Cell {
    let cell = Cell::new(format!("{}%", progress.round())).set_alignment(CellAlignment::Right);
    if progress >= 100.0 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

/// `1 contribution`, `3 contributions`.
pub fn contribution_count_label(count: usize) -> String {
    let suffix = if count != 1 { "s" } else { "" };
    format!("{count} contribution{suffix}")
}
