use thiserror::Error;

use crate::models::CategoryKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount '{0}': enter a positive number up to 1,000,000,000,000,000")]
    InvalidAmount(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Category '{name}' is an {actual} category, expected {expected}")]
    CategoryKindMismatch {
        name: String,
        expected: CategoryKind,
        actual: CategoryKind,
    },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
