use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::{BudgetRecommendation, Category, FinancialSummary, MonthlyTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
    DeleteCategory { id: String, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) ledger: Ledger,

    // Derived from the ledger; rebuilt by `refresh` after every mutation
    pub(crate) summary: FinancialSummary,
    pub(crate) recommendations: Vec<BudgetRecommendation>,
    pub(crate) monthly_trend: Vec<MonthlyTotals>,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Categories
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: Ledger) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            ledger,

            summary: FinancialSummary::default(),
            recommendations: Vec::new(),
            monthly_trend: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,

            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.refresh();
        app
    }

    /// Recompute every derived view from the ledger and clamp cursors.
    pub(crate) fn refresh(&mut self) {
        self.summary = self.ledger.summary();
        self.recommendations = self.ledger.recommendations();
        self.monthly_trend = self.ledger.monthly_trend();

        let txn_count = self.ledger.transaction_count();
        clamp_cursor(&mut self.transaction_index, &mut self.transaction_scroll, txn_count);
        let cat_count = self.ledger.categories().len();
        clamp_cursor(&mut self.category_index, &mut self.category_scroll, cat_count);
    }

    pub(crate) fn selected_transaction(&self) -> Option<(String, String)> {
        self.ledger
            .sorted_transactions()
            .get(self.transaction_index)
            .map(|t| (t.id().to_string(), t.description().to_string()))
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.ledger.categories().get(self.category_index)
    }

    pub(crate) fn spend_for(&self, category_id: &str) -> Decimal {
        self.summary
            .expense_for(category_id)
            .map(|e| e.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_cursor(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}
