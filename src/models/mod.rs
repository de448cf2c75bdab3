mod category;
mod recommendation;
mod summary;
mod transaction;

pub use category::{default_categories, Category, CategoryKind, DEFAULT_COLOR, DEFAULT_ICON};
pub use recommendation::{BudgetRecommendation, Impact};
pub use summary::{CategoryExpense, ChartSlice, FinancialSummary, MonthlyTotals};
pub use transaction::{Expense, Income, Transaction, TransactionRef};
