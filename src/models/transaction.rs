use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fields shared by incomes and expenses.
pub trait Transaction {
    fn id(&self) -> &str;
    fn amount(&self) -> Decimal;
    fn date(&self) -> NaiveDate;
    fn description(&self) -> &str;
    fn category_id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: String,
    pub payment_method: Option<String>,
}

macro_rules! impl_transaction {
    ($ty:ty) => {
        impl Transaction for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn amount(&self) -> Decimal {
                self.amount
            }

            fn date(&self) -> NaiveDate {
                self.date
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn category_id(&self) -> &str {
                &self.category_id
            }
        }
    };
}

impl_transaction!(Income);
impl_transaction!(Expense);

/// A borrowed income or expense, as listed in the combined transaction view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionRef<'a> {
    Income(&'a Income),
    Expense(&'a Expense),
}

impl<'a> TransactionRef<'a> {
    fn inner(&self) -> &'a dyn Transaction {
        match *self {
            Self::Income(i) => i,
            Self::Expense(e) => e,
        }
    }

    pub fn id(&self) -> &'a str {
        self.inner().id()
    }

    pub fn amount(&self) -> Decimal {
        self.inner().amount()
    }

    pub fn date(&self) -> NaiveDate {
        self.inner().date()
    }

    pub fn description(&self) -> &'a str {
        self.inner().description()
    }

    pub fn category_id(&self) -> &'a str {
        self.inner().category_id()
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income(_))
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense(_))
    }

    /// Positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self {
            Self::Income(i) => i.amount,
            Self::Expense(e) => -e.amount,
        }
    }

    /// Income source or expense payment method, if any.
    pub fn detail(&self) -> Option<&'a str> {
        match *self {
            Self::Income(i) => Some(i.source.as_str()),
            Self::Expense(e) => e.payment_method.as_deref(),
        }
    }
}
