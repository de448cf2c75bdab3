use anyhow::{Context, Result};
use std::path::Path;

use crate::import::LedgerImporter;
use crate::ledger::Ledger;
use crate::models::{Category, CategoryKind};
use crate::util::{format_currency, format_percentage, truncate};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "open" | "o" => crate::run::as_tui(load_ledger(&args[2..], "open")?),
        "summary" | "s" => cli_summary(&load_ledger(&args[2..], "summary")?),
        "recommend" | "r" => cli_recommend(&load_ledger(&args[2..], "recommend")?),
        "transactions" | "t" => cli_transactions(&load_ledger(&args[2..], "transactions")?),
        "categories" | "c" => {
            let ledger = if args.len() > 2 {
                load_ledger(&args[2..], "categories")?
            } else {
                Ledger::new()
            };
            cli_categories(&ledger);
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("smartbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SmartBudget: personal budget summaries and recommendations");
    println!();
    println!("Usage: smartbudget [command] [--verbose]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI with the default categories");
    println!("  open <file.csv>               Launch TUI over a ledger CSV");
    println!("  summary <file.csv>            Print income, expenses and savings");
    println!("  recommend <file.csv>          Print budget recommendations");
    println!("  transactions <file.csv>       List transactions, newest first");
    println!("  categories [file.csv]         List categories");
    println!("  --verbose                     Debug logging to stderr (or set RUST_LOG)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Ledger CSV columns: type,date,description,amount,category[,source][,payment_method]");
}

fn load_ledger(args: &[String], command: &str) -> Result<Ledger> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: smartbudget {command} <file.csv>");
    };
    let expanded = crate::run::shellexpand(file_path);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let mut ledger = Ledger::new();
    LedgerImporter::load(path, &mut ledger)
        .with_context(|| format!("Failed to load ledger from {file_path}"))?;
    Ok(ledger)
}

fn cli_summary(ledger: &Ledger) -> Result<()> {
    let summary = ledger.summary();

    println!("SmartBudget Summary");
    println!("{}", "─".repeat(40));
    println!("  Income:       {}", format_currency(summary.total_income));
    println!("  Expenses:     {}", format_currency(summary.total_expenses));
    println!("  Net Savings:  {}", format_currency(summary.net_savings));
    println!("  Savings Rate: {}", format_percentage(summary.savings_rate));
    println!("  Total Txns:   {}", ledger.transaction_count());

    if !summary.expenses_by_category.is_empty() {
        println!();
        println!("Expenses by Category:");
        for entry in &summary.expenses_by_category {
            let category = Category::lookup(ledger.categories(), &entry.category_id);
            println!(
                "  {:<20} {:>14} {:>7}",
                truncate(category.name(), 20),
                format_currency(entry.amount),
                format_percentage(entry.percentage)
            );
        }
    }

    let trend = ledger.monthly_trend();
    if trend.len() > 1 {
        println!();
        println!("Monthly:");
        for month in &trend {
            println!(
                "  {}  in {:>12}  out {:>12}  saved {:>12}",
                month.month,
                format_currency(month.income),
                format_currency(month.expenses),
                format_currency(month.savings)
            );
        }
    }

    Ok(())
}

fn cli_recommend(ledger: &Ledger) -> Result<()> {
    let recommendations = ledger.recommendations();

    println!("Budget Recommendations");
    println!("{}", "─".repeat(40));
    for rec in &recommendations {
        let category = Category::lookup(ledger.categories(), &rec.category_id);
        println!(
            "[{}] {}: suggested {} (current {})",
            rec.impact,
            category.name(),
            format_currency(rec.suggested_amount),
            format_currency(rec.current_amount)
        );
        println!("    {}", rec.reasoning);
    }
    Ok(())
}

fn cli_transactions(ledger: &Ledger) -> Result<()> {
    let transactions = ledger.sorted_transactions();
    if transactions.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<10}  {:<30} {:<16} {:>14}",
        "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(74));
    for txn in &transactions {
        let category = Category::lookup(ledger.categories(), txn.category_id());
        println!(
            "{:<10}  {:<30} {:<16} {:>14}",
            txn.date(),
            truncate(txn.description(), 30),
            truncate(category.name(), 16),
            format_currency(txn.signed_amount())
        );
    }
    Ok(())
}

fn cli_categories(ledger: &Ledger) {
    for kind in [CategoryKind::Income, CategoryKind::Expense] {
        println!("{} categories:", capitalize(kind.as_str()));
        for cat in ledger.categories_of_kind(kind) {
            println!("  {:<16} {:<20} {:<8} {}", cat.id, cat.name, cat.color, cat.icon);
        }
        println!();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
