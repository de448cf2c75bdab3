#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{default_categories, ChartSlice};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn income(id: &str, amount: Decimal, on: &str) -> Income {
    Income {
        id: id.into(),
        amount,
        date: date(on),
        description: "Income".into(),
        category_id: "salary".into(),
        source: "Not specified".into(),
    }
}

fn expense(id: &str, amount: Decimal, category: &str, on: &str) -> Expense {
    Expense {
        id: id.into(),
        amount,
        date: date(on),
        description: "Expense".into(),
        category_id: category.into(),
        payment_method: None,
    }
}

fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(diff < dec!(0.000001), "{actual} != {expected}");
}

// ── calculate_financial_summary ───────────────────────────────

#[test]
fn test_summary_basic_totals() {
    let incomes = vec![income("i1", dec!(5000), "2024-01-01")];
    let expenses = vec![expense("e1", dec!(2000), "housing", "2024-01-02")];
    let s = calculate_financial_summary(&incomes, &expenses, &default_categories());

    assert_eq!(s.total_income, dec!(5000));
    assert_eq!(s.total_expenses, dec!(2000));
    assert_eq!(s.net_savings, dec!(3000));
    assert_eq!(s.savings_rate, dec!(60));
    assert_eq!(s.expenses_by_category.len(), 1);
    assert_eq!(s.expenses_by_category[0].category_id, "housing");
    assert_eq!(s.expenses_by_category[0].percentage, dec!(100));
}

#[test]
fn test_summary_empty_inputs() {
    let s = calculate_financial_summary(&[], &[], &[]);
    assert_eq!(s, FinancialSummary::default());
}

#[test]
fn test_summary_zero_income_has_zero_rate() {
    let expenses = vec![expense("e1", dec!(80), "food", "2024-01-02")];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    assert_eq!(s.savings_rate, Decimal::ZERO);
    assert_eq!(s.net_savings, dec!(-80));
}

#[test]
fn test_summary_negative_savings_rate() {
    let incomes = vec![income("i1", dec!(1000), "2024-01-01")];
    let expenses = vec![expense("e1", dec!(1500), "food", "2024-01-02")];
    let s = calculate_financial_summary(&incomes, &expenses, &default_categories());
    assert_eq!(s.net_savings, dec!(-500));
    assert_eq!(s.savings_rate, dec!(-50));
}

#[test]
fn test_summary_net_savings_identity() {
    let incomes = vec![
        income("i1", dec!(1234.56), "2024-01-01"),
        income("i2", dec!(0.01), "2024-02-01"),
    ];
    let expenses = vec![
        expense("e1", dec!(99.99), "food", "2024-01-02"),
        expense("e2", dec!(300.10), "housing", "2024-01-03"),
    ];
    let s = calculate_financial_summary(&incomes, &expenses, &default_categories());
    assert_eq!(s.total_income - s.total_expenses, s.net_savings);
    assert_eq!(s.net_savings, dec!(834.48));
}

#[test]
fn test_summary_groups_in_first_seen_order() {
    let expenses = vec![
        expense("e1", dec!(10), "food", "2024-01-01"),
        expense("e2", dec!(20), "housing", "2024-01-02"),
        expense("e3", dec!(5), "food", "2024-01-03"),
        expense("e4", dec!(1), "health", "2024-01-04"),
    ];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    let ids: Vec<&str> = s
        .expenses_by_category
        .iter()
        .map(|e| e.category_id.as_str())
        .collect();
    assert_eq!(ids, ["food", "housing", "health"]);
    assert_eq!(s.expense_for("food").unwrap().amount, dec!(15));
}

#[test]
fn test_summary_category_amounts_sum_to_total() {
    let expenses = vec![
        expense("e1", dec!(10.10), "food", "2024-01-01"),
        expense("e2", dec!(20.20), "housing", "2024-01-02"),
        expense("e3", dec!(30.30), "shopping", "2024-01-03"),
    ];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    let sum: Decimal = s.expenses_by_category.iter().map(|e| e.amount).sum();
    assert_eq!(sum, s.total_expenses);
}

#[test]
fn test_summary_percentages_sum_to_hundred() {
    let expenses = vec![
        expense("e1", dec!(1), "food", "2024-01-01"),
        expense("e2", dec!(1), "housing", "2024-01-02"),
        expense("e3", dec!(1), "shopping", "2024-01-03"),
    ];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    let sum: Decimal = s.expenses_by_category.iter().map(|e| e.percentage).sum();
    assert_close(sum, dec!(100));
    assert_close(s.expenses_by_category[0].percentage, dec!(33.333333));
}

#[test]
fn test_summary_omits_zero_amount_categories() {
    let expenses = vec![
        expense("e1", dec!(0), "food", "2024-01-01"),
        expense("e2", dec!(40), "housing", "2024-01-02"),
    ];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    assert_eq!(s.expenses_by_category.len(), 1);
    assert!(s.expense_for("food").is_none());
    assert!(s.expenses_by_category.iter().all(|e| !e.amount.is_zero()));
}

#[test]
fn test_summary_keeps_dangling_category() {
    let expenses = vec![expense("e1", dec!(25), "gone", "2024-01-01")];
    let s = calculate_financial_summary(&[], &expenses, &default_categories());
    assert_eq!(s.expenses_by_category[0].category_id, "gone");
    assert_eq!(s.expenses_by_category[0].percentage, dec!(100));
}

#[test]
fn test_summary_does_not_depend_on_call_history() {
    let incomes = vec![income("i1", dec!(100), "2024-01-01")];
    let expenses = vec![expense("e1", dec!(40), "food", "2024-01-02")];
    let cats = default_categories();
    let first = calculate_financial_summary(&incomes, &expenses, &cats);
    let second = calculate_financial_summary(&incomes, &expenses, &cats);
    assert_eq!(first, second);
}

// ── get_sorted_transactions ───────────────────────────────────

#[test]
fn test_sorted_transactions_newest_first() {
    let incomes = vec![
        income("i1", dec!(1), "2024-01-05"),
        income("i2", dec!(1), "2024-03-01"),
    ];
    let expenses = vec![
        expense("e1", dec!(1), "food", "2024-02-10"),
        expense("e2", dec!(1), "food", "2023-12-31"),
    ];
    let sorted = get_sorted_transactions(&incomes, &expenses);
    assert_eq!(sorted.len(), incomes.len() + expenses.len());
    let ids: Vec<&str> = sorted.iter().map(|t| t.id()).collect();
    assert_eq!(ids, ["i2", "e1", "i1", "e2"]);
    assert!(sorted.windows(2).all(|w| w[0].date() >= w[1].date()));
}

#[test]
fn test_sorted_transactions_equal_dates_are_stable() {
    let incomes = vec![
        income("i1", dec!(1), "2024-01-01"),
        income("i2", dec!(1), "2024-01-01"),
    ];
    let expenses = vec![
        expense("e1", dec!(1), "food", "2024-01-01"),
        expense("e2", dec!(1), "food", "2024-01-01"),
    ];
    let sorted = get_sorted_transactions(&incomes, &expenses);
    let ids: Vec<&str> = sorted.iter().map(|t| t.id()).collect();
    assert_eq!(ids, ["i1", "i2", "e1", "e2"]);
}

#[test]
fn test_sorted_transactions_empty() {
    assert!(get_sorted_transactions(&[], &[]).is_empty());
}

// ── monthly_trend ─────────────────────────────────────────────

#[test]
fn test_monthly_trend_groups_by_month() {
    let incomes = vec![
        income("i1", dec!(3000), "2024-02-01"),
        income("i2", dec!(2000), "2024-01-15"),
        income("i3", dec!(500), "2024-02-20"),
    ];
    let expenses = vec![
        expense("e1", dec!(1200), "housing", "2024-01-03"),
        expense("e2", dec!(400), "food", "2024-03-09"),
    ];
    let trend = monthly_trend(&incomes, &expenses);
    let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(months, ["2024-01", "2024-02", "2024-03"]);

    assert_eq!(trend[0].income, dec!(2000));
    assert_eq!(trend[0].expenses, dec!(1200));
    assert_eq!(trend[0].savings, dec!(800));
    assert_eq!(trend[1].income, dec!(3500));
    assert_eq!(trend[1].expenses, Decimal::ZERO);
    assert_eq!(trend[2].savings, dec!(-400));
}

#[test]
fn test_monthly_trend_spans_years() {
    let incomes = vec![
        income("i1", dec!(1), "2024-01-01"),
        income("i2", dec!(1), "2023-12-01"),
    ];
    let trend = monthly_trend(&incomes, &[]);
    assert_eq!(trend[0].month, "2023-12");
    assert_eq!(trend[1].month, "2024-01");
}

// ── charts ────────────────────────────────────────────────────

#[test]
fn test_expense_breakdown_labels() {
    let expenses = vec![
        expense("e1", dec!(70), "housing", "2024-01-01"),
        expense("e2", dec!(30), "gone", "2024-01-02"),
    ];
    let cats = default_categories();
    let s = calculate_financial_summary(&[], &expenses, &cats);
    let slices = expense_breakdown(&s, &cats);
    assert_eq!(
        slices[0],
        ChartSlice {
            label: "Housing".into(),
            value: dec!(70),
            color: "#007AFF".into(),
        }
    );
    assert_eq!(slices[1].label, "Unknown");
    assert_eq!(slices[1].color, "#cccccc");
}

#[test]
fn test_cash_flow_clamps_negative_savings() {
    let incomes = vec![income("i1", dec!(100), "2024-01-01")];
    let expenses = vec![expense("e1", dec!(250), "food", "2024-01-02")];
    let s = calculate_financial_summary(&incomes, &expenses, &default_categories());
    let bars = cash_flow(&s);
    assert_eq!(bars[0].label, "Income");
    assert_eq!(bars[0].value, dec!(100));
    assert_eq!(bars[1].value, dec!(250));
    assert_eq!(bars[2].label, "Savings");
    assert_eq!(bars[2].value, Decimal::ZERO);
}
