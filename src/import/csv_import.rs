use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::ledger::{ExpenseDraft, IncomeDraft, Ledger};
use crate::models::{Category, CategoryKind};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y", "%d/%m/%Y"];

/// Column positions, resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LedgerColumns {
    pub(crate) kind: usize,
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) amount: usize,
    pub(crate) category: usize,
    pub(crate) source: Option<usize>,
    pub(crate) payment_method: Option<usize>,
}

impl LedgerColumns {
    pub(crate) fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase().replace([' ', '-'], "_");
                names.contains(&h.as_str())
            })
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| anyhow::anyhow!("Missing required column '{}'", names[0]))
        };

        Ok(Self {
            kind: require(&["type", "kind"])?,
            date: require(&["date"])?,
            description: require(&["description", "desc"])?,
            amount: require(&["amount"])?,
            category: require(&["category", "category_id"])?,
            source: find(&["source"]),
            payment_method: find(&["payment_method", "payment"]),
        })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ImportReport {
    pub(crate) incomes: usize,
    pub(crate) expenses: usize,
}

impl ImportReport {
    pub(crate) fn total(&self) -> usize {
        self.incomes + self.expenses
    }
}

pub(crate) struct LedgerImporter;

impl LedgerImporter {
    /// Read the CSV at `path` and return headers + all rows as strings.
    pub(crate) fn read(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut all_rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            all_rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if all_rows.is_empty() {
            anyhow::bail!("CSV file is empty");
        }

        let headers = all_rows.remove(0);
        Ok((headers, all_rows))
    }

    /// Load every row of `path` into `ledger`. Stops at the first invalid row.
    pub(crate) fn load(path: &Path, ledger: &mut Ledger) -> Result<ImportReport> {
        let (headers, rows) = Self::read(path)?;
        let report = Self::apply(&headers, &rows, ledger)?;
        tracing::info!(
            path = %path.display(),
            incomes = report.incomes,
            expenses = report.expenses,
            "Ledger CSV loaded"
        );
        Ok(report)
    }

    /// Validate and add already-read rows to `ledger`.
    pub(crate) fn apply(
        headers: &[String],
        rows: &[Vec<String>],
        ledger: &mut Ledger,
    ) -> Result<ImportReport> {
        let columns = LedgerColumns::from_headers(headers)?;
        let mut report = ImportReport::default();

        for (i, row) in rows.iter().enumerate() {
            // Header is line 1.
            let line = i + 2;
            if row.iter().all(|f| f.trim().is_empty()) {
                tracing::debug!(line, "Skipping blank row");
                continue;
            }

            match Self::apply_row(&columns, row, line, ledger) {
                Ok(CategoryKind::Income) => report.incomes += 1,
                Ok(CategoryKind::Expense) => report.expenses += 1,
                Err(e) => {
                    tracing::warn!(line, error = %format!("{e:#}"), "Rejected ledger row");
                    return Err(e);
                }
            }
        }

        Ok(report)
    }

    fn apply_row(
        columns: &LedgerColumns,
        row: &[String],
        line: usize,
        ledger: &mut Ledger,
    ) -> Result<CategoryKind> {
        let cell = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or("");
        let opt_cell = |col: Option<usize>| col.map(cell).unwrap_or("").to_string();

        let kind = CategoryKind::parse(cell(columns.kind)).with_context(|| {
            format!(
                "Line {line}: type must be 'income' or 'expense', got '{}'",
                cell(columns.kind)
            )
        })?;
        let date = parse_date(cell(columns.date))
            .with_context(|| format!("Line {line}: failed to parse date"))?;
        let category_id = resolve_category(ledger.categories(), cell(columns.category));

        match kind {
            CategoryKind::Income => {
                ledger
                    .add_income(IncomeDraft {
                        description: cell(columns.description).to_string(),
                        amount: cell(columns.amount).to_string(),
                        date,
                        category_id,
                        source: opt_cell(columns.source),
                    })
                    .with_context(|| format!("Line {line}"))?;
            }
            CategoryKind::Expense => {
                ledger
                    .add_expense(ExpenseDraft {
                        description: cell(columns.description).to_string(),
                        amount: cell(columns.amount).to_string(),
                        date,
                        category_id,
                        payment_method: opt_cell(columns.payment_method),
                    })
                    .with_context(|| format!("Line {line}"))?;
            }
        }
        Ok(kind)
    }
}

/// Accept either a category id or a category name in the category column.
fn resolve_category(categories: &[Category], raw: &str) -> String {
    if Category::find_by_id(categories, raw).is_some() {
        return raw.to_string();
    }
    Category::find_by_name(categories, raw)
        .map(|c| c.id.clone())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    anyhow::bail!("Could not parse date: '{}'", s)
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
