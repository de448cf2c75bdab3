#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

const FULL_HEADER: &str = "type,date,description,amount,category,source,payment_method\n";

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(parse_date("2024-01-15").unwrap(), expected);
    assert_eq!(parse_date("01/15/2024").unwrap(), expected);
    assert_eq!(parse_date("01-15-2024").unwrap(), expected);
    assert_eq!(parse_date("01/15/24").unwrap(), expected);
    assert_eq!(parse_date("15/01/2024").unwrap(), expected);
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("yesterday").is_err());
    assert!(parse_date("").is_err());
}

// ── LedgerColumns ─────────────────────────────────────────────

#[test]
fn test_columns_from_headers() {
    let cols = LedgerColumns::from_headers(&headers(&[
        "Type",
        "Date",
        "Description",
        "Amount",
        "Category",
        "Source",
        "Payment Method",
    ]))
    .unwrap();
    assert_eq!(cols.kind, 0);
    assert_eq!(cols.category, 4);
    assert_eq!(cols.source, Some(5));
    assert_eq!(cols.payment_method, Some(6));
}

#[test]
fn test_columns_optional_missing() {
    let cols = LedgerColumns::from_headers(&headers(&[
        "amount",
        "category_id",
        "date",
        "desc",
        "kind",
    ]))
    .unwrap();
    assert_eq!(cols.amount, 0);
    assert_eq!(cols.kind, 4);
    assert_eq!(cols.source, None);
    assert_eq!(cols.payment_method, None);
}

#[test]
fn test_columns_missing_required() {
    let err = LedgerColumns::from_headers(&headers(&["type", "date", "amount"])).unwrap_err();
    assert!(err.to_string().contains("description"));
}

// ── LedgerImporter ────────────────────────────────────────────

#[test]
fn test_load_full_file() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}\
         income,2024-01-01,Paycheck,\"$5,000.00\",salary,Employer,\n\
         expense,2024-01-03,Rent,2000,housing,,Bank transfer\n\
         expense,01/05/2024,Groceries,120.50,Food,,\n"
    ));
    let mut ledger = Ledger::new();
    let report = LedgerImporter::load(file.path(), &mut ledger).unwrap();

    assert_eq!(report, ImportReport { incomes: 1, expenses: 2 });
    assert_eq!(report.total(), 3);
    assert_eq!(ledger.incomes()[0].amount, dec!(5000.00));
    assert_eq!(ledger.incomes()[0].source, "Employer");
    assert_eq!(
        ledger.expenses()[0].payment_method.as_deref(),
        Some("Bank transfer")
    );
    assert_eq!(ledger.expenses()[1].category_id, "food");
    assert_eq!(ledger.expenses()[1].payment_method, None);
    assert_eq!(ledger.summary().total_expenses, dec!(2120.50));
}

#[test]
fn test_load_skips_blank_rows() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}income,2024-01-01,Paycheck,100,salary,,\n,,,,,,\n"
    ));
    let mut ledger = Ledger::new();
    let report = LedgerImporter::load(file.path(), &mut ledger).unwrap();
    assert_eq!(report.total(), 1);
}

#[test]
fn test_load_reports_line_of_bad_amount() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}income,2024-01-01,Paycheck,100,salary,,\nexpense,2024-01-02,Rent,-5,housing,,\n"
    ));
    let mut ledger = Ledger::new();
    let err = LedgerImporter::load(file.path(), &mut ledger).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Line 3"), "{msg}");
    assert!(msg.contains("Invalid amount"), "{msg}");
}

#[test]
fn test_load_rejects_oversized_amount() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}expense,2024-01-01,Rent,1000,housing,,\nexpense,2024-01-02,Rent,50000000000000000000000000000,housing,,\n"
    ));
    let mut ledger = Ledger::new();
    let err = LedgerImporter::load(file.path(), &mut ledger).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Line 3"), "{msg}");
    assert!(msg.contains("Invalid amount"), "{msg}");
}

#[test]
fn test_load_rejects_unknown_type() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}transfer,2024-01-01,Move,100,salary,,\n"
    ));
    let mut ledger = Ledger::new();
    let err = LedgerImporter::load(file.path(), &mut ledger).unwrap_err();
    assert!(err.to_string().contains("Line 2"));
}

#[test]
fn test_load_rejects_unknown_category() {
    let file = make_csv_file(&format!(
        "{FULL_HEADER}expense,2024-01-01,Boat,100,yachts,,\n"
    ));
    let mut ledger = Ledger::new();
    let err = LedgerImporter::load(file.path(), &mut ledger).unwrap_err();
    assert!(format!("{err:#}").contains("Unknown category: yachts"));
}

#[test]
fn test_load_empty_file() {
    let file = make_csv_file("");
    let mut ledger = Ledger::new();
    assert!(LedgerImporter::load(file.path(), &mut ledger).is_err());
}

#[test]
fn test_load_missing_file() {
    let mut ledger = Ledger::new();
    let err = LedgerImporter::load(Path::new("/nonexistent/ledger.csv"), &mut ledger).unwrap_err();
    assert!(err.to_string().contains("Failed to open CSV file"));
}

#[test]
fn test_resolve_category_by_id_or_name() {
    let cats = crate::models::default_categories();
    assert_eq!(resolve_category(&cats, "housing"), "housing");
    assert_eq!(resolve_category(&cats, "Other Income"), "other_income");
    assert_eq!(resolve_category(&cats, "mystery"), "mystery");
}
