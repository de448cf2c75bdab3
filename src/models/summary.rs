use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryExpense {
    pub category_id: String,
    pub amount: Decimal,
    /// Share of total expenses, 0-100.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    /// Net savings as a percentage of total income, 0 when there is no income.
    pub savings_rate: Decimal,
    /// First-seen order; never contains zero-amount entries.
    pub expenses_by_category: Vec<CategoryExpense>,
}

impl FinancialSummary {
    pub fn expense_for(&self, category_id: &str) -> Option<&CategoryExpense> {
        self.expenses_by_category
            .iter()
            .find(|e| e.category_id == category_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyTotals {
    /// Format: "YYYY-MM"
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: Decimal,
    pub color: String,
}
