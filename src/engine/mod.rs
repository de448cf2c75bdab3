//! Aggregation over in-memory incomes and expenses.
//!
//! Every function here is a pure projection of its inputs: nothing is cached
//! between calls and no input is mutated, so callers re-run them after each
//! change to their state.

mod charts;
mod rules;

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{
    Category, CategoryExpense, Expense, FinancialSummary, Income, MonthlyTotals, Transaction,
    TransactionRef,
};

pub(crate) use charts::{cash_flow, expense_breakdown};
pub(crate) use rules::generate_budget_recommendations;

fn total<T: Transaction>(items: &[T]) -> Decimal {
    items.iter().map(Transaction::amount).sum()
}

/// Totals, savings rate and per-category expense breakdown.
///
/// `categories` is accepted for symmetry with the recommendation call; the
/// breakdown is keyed by whatever `category_id` the expenses carry, so
/// dangling references still get their own entry.
pub(crate) fn calculate_financial_summary(
    incomes: &[Income],
    expenses: &[Expense],
    categories: &[Category],
) -> FinancialSummary {
    let total_income = total(incomes);
    let total_expenses = total(expenses);
    let net_savings = total_income - total_expenses;
    let savings_rate = if total_income > Decimal::ZERO {
        net_savings / total_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut expenses_by_category: Vec<CategoryExpense> = Vec::new();
    for expense in expenses {
        match index.get(expense.category_id.as_str()) {
            Some(&i) => expenses_by_category[i].amount += expense.amount,
            None => {
                index.insert(expense.category_id.as_str(), expenses_by_category.len());
                expenses_by_category.push(CategoryExpense {
                    category_id: expense.category_id.clone(),
                    amount: expense.amount,
                    percentage: Decimal::ZERO,
                });
            }
        }
    }

    expenses_by_category.retain(|e| !e.amount.is_zero());
    if total_expenses > Decimal::ZERO {
        for entry in &mut expenses_by_category {
            entry.percentage = entry.amount / total_expenses * Decimal::ONE_HUNDRED;
        }
    }

    let dangling = expenses_by_category
        .iter()
        .filter(|e| Category::find_by_id(categories, &e.category_id).is_none())
        .count();

    tracing::debug!(
        incomes = incomes.len(),
        expenses = expenses.len(),
        %total_income,
        %total_expenses,
        %savings_rate,
        dangling_categories = dangling,
        "Computed financial summary"
    );

    FinancialSummary {
        total_income,
        total_expenses,
        net_savings,
        savings_rate,
        expenses_by_category,
    }
}

/// Incomes and expenses merged, most recent first.
///
/// The sort is stable: on equal dates incomes come before expenses and each
/// keeps its input order.
pub(crate) fn get_sorted_transactions<'a>(
    incomes: &'a [Income],
    expenses: &'a [Expense],
) -> Vec<TransactionRef<'a>> {
    let mut all: Vec<TransactionRef<'a>> = incomes
        .iter()
        .map(TransactionRef::Income)
        .chain(expenses.iter().map(TransactionRef::Expense))
        .collect();
    all.sort_by(|a, b| b.date().cmp(&a.date()));
    all
}

/// Income, expense and savings totals per calendar month, oldest first.
/// Months without any transaction are omitted.
pub(crate) fn monthly_trend(incomes: &[Income], expenses: &[Expense]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for income in incomes {
        let key = (income.date.year(), income.date.month());
        months.entry(key).or_default().0 += income.amount;
    }
    for expense in expenses {
        let key = (expense.date.year(), expense.date.month());
        months.entry(key).or_default().1 += expense.amount;
    }

    months
        .into_iter()
        .map(|((year, month), (income, expenses))| MonthlyTotals {
            month: format!("{year:04}-{month:02}"),
            income,
            expenses,
            savings: income - expenses,
        })
        .collect()
}

#[cfg(test)]
mod tests;
