use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

/// Headline figures for a set of transactions
///
/// Every field is zero for an empty set. Totals saturate at the `Decimal`
/// bounds instead of overflowing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
    pub highest_income: Decimal,
    pub highest_expense: Decimal,
    pub transaction_count: usize,
    /// Percentage of income not spent; zero without income
    pub savings_rate: Decimal,
}

/// Running sum, count and maximum for one transaction type
#[derive(Default)]
struct Tally {
    total: Decimal,
    count: usize,
    highest: Decimal,
}

impl Tally {
    fn record(&mut self, amount: Decimal) {
        self.total = self.total.saturating_add(amount);
        self.highest = if self.count == 0 {
            amount
        } else {
            self.highest.max(amount)
        };
        self.count += 1;
    }

    fn average(&self) -> Decimal {
        if self.count == 0 {
            Decimal::ZERO
        } else {
            self.total / Decimal::from(self.count)
        }
    }
}

/// Compute summary statistics
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = Tally::default();
    let mut expenses = Tally::default();

    for tx in transactions {
        match tx.tx_type {
            TransactionType::Income => income.record(tx.amount),
            TransactionType::Expense => expenses.record(tx.amount),
        }
    }

    let balance = income.total.saturating_sub(expenses.total);

    Summary {
        total_income: income.total,
        total_expenses: expenses.total,
        balance,
        avg_income: income.average(),
        avg_expense: expenses.average(),
        highest_income: income.highest,
        highest_expense: expenses.highest,
        transaction_count: transactions.len(),
        savings_rate: savings_rate(balance, income.total),
    }
}

/// `balance / income * 100`, zero without income, saturating when the ratio
/// does not fit a `Decimal`
fn savings_rate(balance: Decimal, income: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    balance
        .checked_div(income)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if balance.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}
