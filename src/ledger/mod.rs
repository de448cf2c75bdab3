//! In-memory application state: the category set plus recorded incomes and
//! expenses. All mutation goes through here; every read of derived data
//! re-runs the engine on the current state.

mod error;

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine;
use crate::models::{
    default_categories, BudgetRecommendation, Category, CategoryKind, Expense, FinancialSummary,
    Income, MonthlyTotals, TransactionRef, DEFAULT_COLOR, DEFAULT_ICON,
};
use crate::util::generate_id;

pub use error::{LedgerError, Result};

pub(crate) const DEFAULT_SOURCE: &str = "Not specified";

/// Largest single amount accepted (1e15). Keeps engine totals and ratios
/// well inside `Decimal` range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x3_8D7E, 0, false, 0);

/// Unvalidated income entry, as typed by the user.
#[derive(Debug, Clone)]
pub struct IncomeDraft {
    pub description: String,
    pub amount: String,
    pub date: NaiveDate,
    pub category_id: String,
    pub source: String,
}

/// Unvalidated expense entry, as typed by the user.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub date: NaiveDate,
    pub category_id: String,
    pub payment_method: String,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub kind: CategoryKind,
    /// Blank means the default color.
    pub color: String,
    /// Blank means the default icon.
    pub icon: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: String::new(),
            icon: String::new(),
        }
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            kind: category.kind,
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

#[derive(Debug)]
pub struct DeletedCategory {
    pub category: Category,
    pub removed_transactions: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    categories: Vec<Category>,
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
}

impl Ledger {
    /// A ledger seeded with the default category set.
    pub fn new() -> Self {
        Self {
            categories: default_categories(),
            ..Self::empty()
        }
    }

    /// A ledger with no categories at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn transaction_count(&self) -> usize {
        self.incomes.len() + self.expenses.len()
    }

    pub fn categories_of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    // ── Derived views ─────────────────────────────────────────

    pub fn summary(&self) -> FinancialSummary {
        engine::calculate_financial_summary(&self.incomes, &self.expenses, &self.categories)
    }

    pub fn recommendations(&self) -> Vec<BudgetRecommendation> {
        engine::generate_budget_recommendations(&self.incomes, &self.expenses, &self.categories)
    }

    pub fn sorted_transactions(&self) -> Vec<TransactionRef<'_>> {
        engine::get_sorted_transactions(&self.incomes, &self.expenses)
    }

    pub fn monthly_trend(&self) -> Vec<MonthlyTotals> {
        engine::monthly_trend(&self.incomes, &self.expenses)
    }

    // ── Transactions ──────────────────────────────────────────

    pub fn add_income(&mut self, draft: IncomeDraft) -> Result<&Income> {
        let amount = validate_entry(&draft.description, &draft.amount, &draft.category_id)?;
        self.require_category(&draft.category_id, CategoryKind::Income)?;

        let source = draft.source.trim();
        let income = Income {
            id: generate_id(),
            amount,
            date: draft.date,
            description: draft.description.trim().to_string(),
            category_id: draft.category_id,
            source: if source.is_empty() {
                DEFAULT_SOURCE.to_string()
            } else {
                source.to_string()
            },
        };
        tracing::info!(id = %income.id, amount = %income.amount, category = %income.category_id, "Income added");
        self.incomes.push(income);
        Ok(&self.incomes[self.incomes.len() - 1])
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<&Expense> {
        let amount = validate_entry(&draft.description, &draft.amount, &draft.category_id)?;
        self.require_category(&draft.category_id, CategoryKind::Expense)?;

        let payment_method = draft.payment_method.trim();
        let expense = Expense {
            id: generate_id(),
            amount,
            date: draft.date,
            description: draft.description.trim().to_string(),
            category_id: draft.category_id,
            payment_method: (!payment_method.is_empty()).then(|| payment_method.to_string()),
        };
        tracing::info!(id = %expense.id, amount = %expense.amount, category = %expense.category_id, "Expense added");
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        if let Some(pos) = self.incomes.iter().position(|i| i.id == id) {
            self.incomes.remove(pos);
        } else if let Some(pos) = self.expenses.iter().position(|e| e.id == id) {
            self.expenses.remove(pos);
        } else {
            return Err(LedgerError::TransactionNotFound(id.to_string()));
        }
        tracing::info!(id, "Transaction deleted");
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub fn add_category(&mut self, draft: CategoryDraft) -> Result<&Category> {
        let name = validate_name(&draft.name)?;
        let mut category = Category::new(generate_id(), name, draft.kind);
        if !draft.color.trim().is_empty() {
            category.color = draft.color.trim().to_string();
        }
        if !draft.icon.trim().is_empty() {
            category.icon = draft.icon.trim().to_string();
        }
        tracing::info!(
            id = %category.id,
            name = %category.name,
            kind = %category.kind,
            "Category added"
        );
        self.categories.push(category);
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Replace everything but the id of an existing category.
    pub fn edit_category(&mut self, id: &str, draft: CategoryDraft) -> Result<&Category> {
        let name = validate_name(&draft.name)?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LedgerError::CategoryNotFound(id.to_string()))?;

        category.name = name;
        category.color = or_default(&draft.color, DEFAULT_COLOR);
        category.icon = or_default(&draft.icon, DEFAULT_ICON);
        category.kind = draft.kind;
        tracing::info!(id, name = %category.name, "Category updated");
        Ok(category)
    }

    /// Remove a category together with every transaction filed under it.
    pub fn delete_category(&mut self, id: &str) -> Result<DeletedCategory> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::CategoryNotFound(id.to_string()))?;
        let category = self.categories.remove(pos);

        let before = self.transaction_count();
        self.incomes.retain(|i| i.category_id != id);
        self.expenses.retain(|e| e.category_id != id);
        let removed_transactions = before - self.transaction_count();

        tracing::info!(id, name = %category.name, removed_transactions, "Category deleted");
        Ok(DeletedCategory {
            category,
            removed_transactions,
        })
    }

    fn require_category(&self, id: &str, expected: CategoryKind) -> Result<()> {
        let category = Category::find_by_id(&self.categories, id)
            .ok_or_else(|| LedgerError::UnknownCategory(id.to_string()))?;
        if category.kind != expected {
            return Err(LedgerError::CategoryKindMismatch {
                name: category.name.clone(),
                expected,
                actual: category.kind,
            });
        }
        Ok(())
    }
}

/// Required-field and amount checks shared by incomes and expenses.
fn validate_entry(description: &str, amount: &str, category_id: &str) -> Result<Decimal> {
    if description.trim().is_empty() {
        return Err(LedgerError::MissingField("description"));
    }
    if amount.trim().is_empty() {
        return Err(LedgerError::MissingField("amount"));
    }
    if category_id.trim().is_empty() {
        return Err(LedgerError::MissingField("category"));
    }
    parse_amount(amount)
}

/// Parse a user-entered amount, tolerating `$` and thousands separators.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    let cleaned = raw.replace(['$', ','], "");
    match Decimal::from_str(cleaned.trim()) {
        Ok(amount) if amount > Decimal::ZERO && amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(LedgerError::InvalidAmount(raw.trim().to_string())),
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField("name"));
    }
    Ok(trimmed.to_string())
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
