use super::ui;
use crate::core::{Fund, analytics};
use comfy_table::Cell;

/// Renders a fund's contributions, newest first.
pub fn render(fund: &Fund, currency_symbol: &str) -> String {
    let mut output = format!(
        "{} - History\n\n",
        ui::style_text(&fund.name, ui::StyleType::Title)
    );

    if fund.contributions.is_empty() {
        output.push_str(&ui::style_text(
            "No contributions yet.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Amount"),
        ui::header_cell("Note"),
        ui::header_cell("Id"),
    ]);
    for contribution in &fund.contributions {
        table.add_row(vec![
            Cell::new(ui::format_date(contribution.date)),
            ui::amount_cell(ui::format_currency(contribution.amount, currency_symbol)),
            Cell::new(&contribution.note),
            Cell::new(ui::style_text(&contribution.id, ui::StyleType::Subtle)),
        ]);
    }
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\n{} ({}): {}",
        ui::style_text("Total", ui::StyleType::TotalLabel),
        ui::contribution_count_label(fund.contributions.len()),
        ui::style_text(
            &ui::format_currency(analytics::current_amount(fund), currency_symbol),
            ui::StyleType::TotalValue
        )
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Contribution;
    use chrono::NaiveDate;

    fn fund(contributions: Vec<Contribution>) -> Fund {
        Fund {
            id: "f1".to_string(),
            name: "Vacation".to_string(),
            target_amount: 5000.0,
            target_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            color: String::new(),
            contributions,
        }
    }

    #[test]
    fn test_render_empty_history() {
        let output = render(&fund(vec![]), "₱");
        assert!(output.contains("Vacation"));
        assert!(output.contains("No contributions yet."));
    }

    #[test]
    fn test_render_history_rows() {
        let output = render(
            &fund(vec![
                Contribution {
                    id: "c2".to_string(),
                    amount: 1500.0,
                    date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                    note: "Tax refund".to_string(),
                },
                Contribution {
                    id: "c1".to_string(),
                    amount: 250.0,
                    date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    note: String::new(),
                },
            ]),
            "₱",
        );

        assert!(output.contains("Mar 2, 2024"));
        assert!(output.contains("₱1,500"));
        assert!(output.contains("Tax refund"));
        assert!(output.contains("2 contributions"));
        assert!(output.contains("₱1,750"));
        assert!(output.find("Mar 2, 2024") < output.find("Feb 1, 2024"));
    }
}
