use rust_decimal::Decimal;

use super::calculate_financial_summary;
use crate::models::{BudgetRecommendation, Category, Expense, FinancialSummary, Impact, Income};

pub(crate) const HOUSING_CATEGORY_ID: &str = "housing";
pub(crate) const FOOD_CATEGORY_ID: &str = "food";
pub(crate) const INVESTMENT_CATEGORY_ID: &str = "investment";
pub(crate) const OTHER_EXPENSE_CATEGORY_ID: &str = "other_expense";

const HOUSING_REASONING: &str = "Housing expenses should ideally be less than 30% of income.";
const FOOD_REASONING: &str = "Food expenses could be reduced through meal planning.";
const LOW_SAVINGS_REASONING: &str =
    "Try to save at least 20% of your income for financial security.";
const GOOD_SAVINGS_REASONING: &str =
    "Great job saving! Consider investing some of your savings for growth.";

/// Category ids and thresholds the built-in rules work against.
/// Percentages are on a 0-100 scale.
#[derive(Debug, Clone)]
pub(crate) struct RuleConfig {
    pub(crate) housing_category_id: String,
    pub(crate) housing_max_share: Decimal,
    pub(crate) food_category_id: String,
    pub(crate) food_max_share: Decimal,
    pub(crate) savings_target_rate: Decimal,
    /// Bucket the "save more" suggestion is filed under.
    pub(crate) shortfall_category_id: String,
    /// Bucket the "invest" suggestion is filed under.
    pub(crate) investment_category_id: String,
    /// Fraction of net savings suggested for investing.
    pub(crate) invest_fraction: Decimal,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            housing_category_id: HOUSING_CATEGORY_ID.into(),
            housing_max_share: Decimal::new(30, 0),
            food_category_id: FOOD_CATEGORY_ID.into(),
            food_max_share: Decimal::new(15, 0),
            savings_target_rate: Decimal::new(20, 0),
            shortfall_category_id: OTHER_EXPENSE_CATEGORY_ID.into(),
            investment_category_id: INVESTMENT_CATEGORY_ID.into(),
            invest_fraction: Decimal::new(5, 1),
        }
    }
}

/// A single recommendation rule: a predicate over the summary plus the
/// recommendation it produces when the predicate holds.
pub(crate) trait Rule {
    fn name(&self) -> &'static str;

    fn evaluate(&self, summary: &FinancialSummary) -> Option<BudgetRecommendation>;
}

/// Fires when one category's share of total expenses strictly exceeds
/// `max_share`, suggesting that share of income instead.
pub(crate) struct CategoryShareRule {
    name: &'static str,
    category_id: String,
    max_share: Decimal,
    reasoning: &'static str,
}

impl CategoryShareRule {
    pub(crate) fn new(
        name: &'static str,
        category_id: String,
        max_share: Decimal,
        reasoning: &'static str,
    ) -> Self {
        Self {
            name,
            category_id,
            max_share,
            reasoning,
        }
    }
}

impl Rule for CategoryShareRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, summary: &FinancialSummary) -> Option<BudgetRecommendation> {
        let spend = summary.expense_for(&self.category_id)?;
        if spend.percentage <= self.max_share {
            return None;
        }
        Some(BudgetRecommendation {
            category_id: self.category_id.clone(),
            suggested_amount: summary.total_income * self.max_share / Decimal::ONE_HUNDRED,
            current_amount: spend.amount,
            reasoning: self.reasoning.to_string(),
            impact: Impact::Negative,
        })
    }
}

/// Always produces exactly one recommendation: save more when the savings
/// rate is under target, otherwise invest part of the surplus.
pub(crate) struct SavingsRateRule {
    target_rate: Decimal,
    shortfall_category_id: String,
    investment_category_id: String,
    invest_fraction: Decimal,
}

impl SavingsRateRule {
    pub(crate) fn new(config: &RuleConfig) -> Self {
        Self {
            target_rate: config.savings_target_rate,
            shortfall_category_id: config.shortfall_category_id.clone(),
            investment_category_id: config.investment_category_id.clone(),
            invest_fraction: config.invest_fraction,
        }
    }
}

impl Rule for SavingsRateRule {
    fn name(&self) -> &'static str {
        "savings-rate"
    }

    fn evaluate(&self, summary: &FinancialSummary) -> Option<BudgetRecommendation> {
        let rec = if summary.savings_rate < self.target_rate {
            BudgetRecommendation {
                category_id: self.shortfall_category_id.clone(),
                suggested_amount: summary.total_income * self.target_rate / Decimal::ONE_HUNDRED,
                current_amount: summary.net_savings,
                reasoning: LOW_SAVINGS_REASONING.to_string(),
                impact: Impact::Negative,
            }
        } else {
            BudgetRecommendation {
                category_id: self.investment_category_id.clone(),
                suggested_amount: summary.net_savings * self.invest_fraction,
                current_amount: Decimal::ZERO,
                reasoning: GOOD_SAVINGS_REASONING.to_string(),
                impact: Impact::Positive,
            }
        };
        Some(rec)
    }
}

/// Ordered rule list. Rules are evaluated independently, in registration order.
pub(crate) struct Recommender {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(&RuleConfig::default())
    }
}

impl Recommender {
    pub(crate) fn new(config: &RuleConfig) -> Self {
        let mut recommender = Self { rules: vec![] };

        recommender.register(Box::new(CategoryShareRule::new(
            "housing-share",
            config.housing_category_id.clone(),
            config.housing_max_share,
            HOUSING_REASONING,
        )));
        recommender.register(Box::new(CategoryShareRule::new(
            "food-share",
            config.food_category_id.clone(),
            config.food_max_share,
            FOOD_REASONING,
        )));
        recommender.register(Box::new(SavingsRateRule::new(config)));

        recommender
    }

    pub(crate) fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub(crate) fn recommend(
        &self,
        summary: &FinancialSummary,
        categories: &[Category],
    ) -> Vec<BudgetRecommendation> {
        let mut recommendations = Vec::new();

        for rule in &self.rules {
            let Some(rec) = rule.evaluate(summary) else {
                continue;
            };
            if Category::find_by_id(categories, &rec.category_id).is_none() {
                tracing::debug!(
                    rule = rule.name(),
                    category = %rec.category_id,
                    "Recommendation targets a category that is not in the current set"
                );
            }
            tracing::debug!(
                rule = rule.name(),
                suggested = %rec.suggested_amount,
                current = %rec.current_amount,
                impact = rec.impact.as_str(),
                "Rule fired"
            );
            recommendations.push(rec);
        }

        recommendations
    }
}

/// Summarise and run the default rule set.
pub(crate) fn generate_budget_recommendations(
    incomes: &[Income],
    expenses: &[Expense],
    categories: &[Category],
) -> Vec<BudgetRecommendation> {
    let summary = calculate_financial_summary(incomes, expenses, categories);
    Recommender::default().recommend(&summary, categories)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
