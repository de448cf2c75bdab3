#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::ledger::Ledger;
use crate::models::default_categories;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn app() -> App {
    App::new(Ledger::new())
}

fn run(app: &mut App, input: &str) {
    handle_command(input, app).unwrap();
}

// ── parse_entry ───────────────────────────────────────────────

#[test]
fn test_parse_entry_full() {
    let cats = default_categories();
    let entry = parse_entry("2024-01-05 1,200 Housing Monthly rent | Bank transfer", &cats, day(31))
        .unwrap();
    assert_eq!(entry.date, day(5));
    assert_eq!(entry.amount, "1,200");
    assert_eq!(entry.category_id, "housing");
    assert_eq!(entry.description, "Monthly rent");
    assert_eq!(entry.detail, "Bank transfer");
}

#[test]
fn test_parse_entry_defaults_date_and_detail() {
    let cats = default_categories();
    let entry = parse_entry("12.50 food Lunch", &cats, day(31)).unwrap();
    assert_eq!(entry.date, day(31));
    assert_eq!(entry.category_id, "food");
    assert_eq!(entry.detail, "");
}

#[test]
fn test_parse_entry_keeps_unknown_category_token() {
    let cats = default_categories();
    let entry = parse_entry("10 yachts Boat", &cats, day(1)).unwrap();
    assert_eq!(entry.category_id, "yachts");
}

#[test]
fn test_parse_entry_requires_amount_and_category() {
    let cats = default_categories();
    assert!(parse_entry("", &cats, day(1)).is_none());
    assert!(parse_entry("2024-01-02 50", &cats, day(1)).is_none());
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("income", "income"), 0);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = app();
    run(&mut app, "expens 10 food x");
    assert!(app.status_message.contains("Did you mean :expense?"));
}

#[test]
fn test_navigation_commands() {
    let mut app = app();
    run(&mut app, "t");
    assert_eq!(app.screen, Screen::Transactions);
    run(&mut app, "categories");
    assert_eq!(app.screen, Screen::Categories);
    run(&mut app, "d");
    assert_eq!(app.screen, Screen::Dashboard);
    run(&mut app, "help");
    assert!(app.show_help);
    run(&mut app, "q");
    assert!(!app.running);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_income_and_expense_refresh_views() {
    let mut app = app();
    run(&mut app, "income 2024-01-01 5000 salary Paycheck | Employer");
    run(&mut app, "ex 2024-01-02 2000 housing Rent | Bank transfer");

    assert_eq!(app.ledger.incomes()[0].source, "Employer");
    assert_eq!(
        app.ledger.expenses()[0].payment_method.as_deref(),
        Some("Bank transfer")
    );
    assert_eq!(app.summary.net_savings, dec!(3000));
    assert_eq!(app.recommendations.len(), 2);
    assert!(app.status_message.contains("$2,000.00"));
}

#[test]
fn test_invalid_entry_reports_error() {
    let mut app = app();
    run(&mut app, "income 2024-01-01 5000 food Paycheck");
    assert!(app.status_message.starts_with("Income not added:"));
    assert!(app.ledger.incomes().is_empty());

    run(&mut app, "expense -5 food Lunch");
    assert!(app.status_message.contains("Invalid amount '-5'"));

    run(&mut app, "expense");
    assert!(app.status_message.starts_with("Usage:"));
}

#[test]
fn test_delete_txn_needs_confirmation() {
    let mut app = app();
    run(&mut app, "ex 2024-01-02 20 food Lunch");
    app.screen = Screen::Transactions;
    run(&mut app, "delete-txn");

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Lunch'?");
    let action = app.pending_action.take().unwrap();
    confirm(action, &mut app).unwrap();

    assert_eq!(app.ledger.transaction_count(), 0);
    assert_eq!(app.status_message, "Deleted: Lunch");
}

#[test]
fn test_delete_txn_only_on_transactions_screen() {
    let mut app = app();
    run(&mut app, "ex 2024-01-02 20 food Lunch");
    run(&mut app, "delete-txn");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_create_category() {
    let mut app = app();
    run(&mut app, "category expense Pets");
    let cat = Category::find_by_name(app.ledger.categories(), "pets").unwrap();
    assert_eq!(cat.kind, CategoryKind::Expense);
    assert_eq!(app.status_message, "Created expense category: Pets");

    run(&mut app, "category savings Pets");
    assert!(app.status_message.starts_with("Usage:"));
}

#[test]
fn test_edit_selected_category() {
    let mut app = app();
    app.category_index = 4; // Food
    run(&mut app, "rename-category Groceries");
    run(&mut app, "color #ff9500");
    run(&mut app, "icon cart");

    let cat = Category::find_by_id(app.ledger.categories(), "food").unwrap();
    assert_eq!(cat.name, "Groceries");
    assert_eq!(cat.color, "#FF9500");
    assert_eq!(cat.icon, "cart");

    run(&mut app, "color orange");
    assert_eq!(app.status_message, "Usage: :color #RRGGBB");
}

#[test]
fn test_edit_category_fields() {
    let mut app = app();
    app.category_index = 2; // Other Income
    run(&mut app, "edit-category type expense");
    run(&mut app, "edit-category name Refunds");

    let cat = Category::find_by_id(app.ledger.categories(), "other_income").unwrap();
    assert_eq!(cat.kind, CategoryKind::Expense);
    assert_eq!(cat.name, "Refunds");

    run(&mut app, "edit-category size large");
    assert!(app.status_message.starts_with("Usage: :edit-category"));
}

#[test]
fn test_delete_category_cascades_after_confirm() {
    let mut app = app();
    run(&mut app, "ex 2024-01-02 20 food Lunch");
    run(&mut app, "ex 2024-01-03 30 food Dinner");
    app.category_index = 4;
    run(&mut app, "delete-category");

    assert_eq!(
        app.confirm_message,
        "Delete category 'Food' and its 2 transaction(s)?"
    );
    let action = app.pending_action.take().unwrap();
    confirm(action, &mut app).unwrap();

    assert_eq!(app.ledger.categories().len(), 11);
    assert_eq!(app.ledger.transaction_count(), 0);
    assert!(app.status_message.contains("2 transaction(s) removed"));
}

// ── Import ────────────────────────────────────────────────────

#[test]
fn test_import_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    std::fs::write(
        &path,
        "type,date,description,amount,category\n\
         income,2024-01-01,Paycheck,5000,salary\n\
         expense,2024-01-02,Rent,2000,Housing\n",
    )
    .unwrap();

    let mut app = app();
    run(&mut app, &format!("import {}", path.display()));
    assert_eq!(app.ledger.transaction_count(), 2);
    assert!(app.status_message.starts_with("Imported 2 transactions (1 income, 1 expense)"));
}

#[test]
fn test_failed_import_leaves_ledger_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "type,date,description,amount,category\n\
         income,2024-01-01,Paycheck,5000,salary\n\
         expense,2024-01-02,Rent,-1,housing\n",
    )
    .unwrap();

    let mut app = app();
    run(&mut app, &format!("import {}", path.display()));
    assert_eq!(app.ledger.transaction_count(), 0);
    assert!(app.status_message.starts_with("Import failed: Line 3: Invalid amount"));
}
