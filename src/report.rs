// 📊 Results Report
// Table rows and page metadata shared by the CLI, the terminal UI and the web page

use crate::calculator::{LoanInputs, LoanSummary};
use crate::format::{currency, decimal2, percent_label};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Cost,
    DownPayment,
    BankLoan,
    MonthlyPayment,
    PaymentMinusRent,
    AnnualYield,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub kind: RowKind,
    pub label: String,
    pub value: String,
}

impl ReportRow {
    fn new(kind: RowKind, label: impl Into<String>, value: String) -> Self {
        ReportRow {
            kind,
            label: label.into(),
            value,
        }
    }
}

/// The six rows of the results table, in display order
pub fn rows(inputs: &LoanInputs, summary: &LoanSummary) -> Vec<ReportRow> {
    vec![
        ReportRow::new(RowKind::Cost, "Cost", currency(summary.full_cost)),
        ReportRow::new(
            RowKind::DownPayment,
            format!("Down payment {}%", percent_label(inputs.down_coefficient)),
            currency(summary.initial_down_payment),
        ),
        ReportRow::new(RowKind::BankLoan, "Bank loan", currency(summary.loan_amount)),
        ReportRow::new(
            RowKind::MonthlyPayment,
            "Monthly payment",
            currency(summary.monthly_pay),
        ),
        ReportRow::new(
            RowKind::PaymentMinusRent,
            "Monthly payment - rent",
            currency(summary.net_monthly_cost(inputs.rent)),
        ),
        ReportRow::new(RowKind::AnnualYield, "Annual yield", decimal2(summary.anual_yield)),
    ]
}

/// Plain-text table for terminal output
pub fn render_text(rows: &[ReportRow]) -> String {
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|r| format!("{:<width$}  {:>16}", r.label, r.value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// PAGE META
// ============================================================================

/// Title and description used when a share link is previewed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    pub fn new(inputs: &LoanInputs, summary: &LoanSummary) -> Self {
        PageMeta {
            title: format!("Yield: {}", decimal2(summary.anual_yield)),
            description: format!(
                "Total cost: {}\nPayment: {}\nPayment - rent: {}",
                currency(summary.full_cost),
                currency(summary.monthly_pay),
                currency(summary.net_monthly_cost(inputs.rent)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;

    #[test]
    fn test_default_rows() {
        let inputs = LoanInputs::default();
        let rows = rows(&inputs, &compute(&inputs));

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, "$130,000,000");
        assert_eq!(rows[1].label, "Down payment 30%");
        assert_eq!(rows[1].value, "$39,000,000");
        assert_eq!(rows[2].value, "$91,000,000");
        assert_eq!(rows[5].kind, RowKind::AnnualYield);
        assert_eq!(rows[5].value, "0.59");
    }

    #[test]
    fn test_payment_minus_rent_row() {
        let inputs = LoanInputs::default();
        let summary = compute(&inputs);
        let rows = rows(&inputs, &summary);

        assert_eq!(rows[4].value, currency(summary.monthly_pay - 770_000.0));
    }

    #[test]
    fn test_zero_rate_renders_nan() {
        let inputs = LoanInputs {
            interest_rate: 0.0,
            ..LoanInputs::default()
        };
        let rows = rows(&inputs, &compute(&inputs));

        assert_eq!(rows[3].value, "$NaN");
        assert_eq!(rows[4].value, "$NaN");
    }

    #[test]
    fn test_render_text_aligns_labels() {
        let inputs = LoanInputs::default();
        let text = render_text(&rows(&inputs, &compute(&inputs)));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Cost "));
        assert!(lines[0].ends_with("$130,000,000"));
        assert!(lines[5].ends_with("0.59"));
    }

    #[test]
    fn test_page_meta() {
        let inputs = LoanInputs::default();
        let meta = PageMeta::new(&inputs, &compute(&inputs));

        assert_eq!(meta.title, "Yield: 0.59");
        assert!(meta.description.starts_with("Total cost: $130,000,000\nPayment: $"));
        assert_eq!(meta.description.lines().count(), 3);
    }
}
