use rust_decimal::Decimal;

use crate::models::{Category, ChartSlice, FinancialSummary};

const INCOME_COLOR: &str = "#34C759";
const EXPENSE_COLOR: &str = "#FF3B30";
const SAVINGS_COLOR: &str = "#5AC8FA";

/// One slice per `expenses_by_category` entry, labelled with the category
/// name (or "Unknown" for a dangling id).
pub(crate) fn expense_breakdown(
    summary: &FinancialSummary,
    categories: &[Category],
) -> Vec<ChartSlice> {
    summary
        .expenses_by_category
        .iter()
        .map(|entry| {
            let category = Category::lookup(categories, &entry.category_id);
            ChartSlice {
                label: category.name().to_string(),
                value: entry.amount,
                color: category.color().to_string(),
            }
        })
        .collect()
}

/// Income vs. expenses vs. savings. Negative savings are shown as zero.
pub(crate) fn cash_flow(summary: &FinancialSummary) -> [ChartSlice; 3] {
    [
        ChartSlice {
            label: "Income".into(),
            value: summary.total_income,
            color: INCOME_COLOR.into(),
        },
        ChartSlice {
            label: "Expenses".into(),
            value: summary.total_expenses,
            color: EXPENSE_COLOR.into(),
        },
        ChartSlice {
            label: "Savings".into(),
            value: summary.net_savings.max(Decimal::ZERO),
            color: SAVINGS_COLOR.into(),
        },
    ]
}
