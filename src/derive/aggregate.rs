use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

/// Number of months the monthly chart shows by default
pub const DEFAULT_CHART_MONTHS: usize = 6;

/// Total spent per category, expenses only
///
/// Totals saturate at `Decimal::MAX` instead of overflowing.
pub fn expenses_by_category(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let total = totals.entry(tx.category.clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(tx.amount);
    }

    totals
}

/// One slice of the expenses-by-category chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Share of all expenses, 0 to 100
    pub percent: Decimal,
}

/// Expense totals per category, largest first, with their share of all expenses
///
/// Categories with equal totals are ordered by name.
pub fn expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = expenses_by_category(transactions);
    let grand_total = totals
        .values()
        .fold(Decimal::ZERO, |sum, total| sum.saturating_add(*total));

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| {
            let percent = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                total
                    .checked_div(grand_total)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ONE_HUNDRED)
            };
            CategoryShare {
                category,
                total,
                percent,
            }
        })
        .collect();

    shares.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

/// Income and expenses within one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub year: i32,
    /// 1 to 12
    pub month: u32,
    /// Short display name such as `Jan 2024`
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Totals per calendar month, oldest first
///
/// Only months with at least one transaction appear. Sums saturate at the
/// `Decimal` bounds instead of overflowing.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), MonthlyTotals> = BTreeMap::new();

    for tx in transactions {
        let key = (tx.date.year(), tx.date.month());
        let entry = months.entry(key).or_insert_with(|| MonthlyTotals {
            year: key.0,
            month: key.1,
            label: tx.date.format("%b %Y").to_string(),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            balance: Decimal::ZERO,
        });

        match tx.tx_type {
            TransactionType::Income => entry.income = entry.income.saturating_add(tx.amount),
            TransactionType::Expense => entry.expense = entry.expense.saturating_add(tx.amount),
        }
    }

    months
        .into_values()
        .map(|mut totals| {
            totals.balance = totals.income.saturating_sub(totals.expense);
            totals
        })
        .collect()
}

/// The last `count` months of an oldest-first series
pub fn recent_months(months: &[MonthlyTotals], count: usize) -> &[MonthlyTotals] {
    &months[months.len().saturating_sub(count)..]
}

/// Distinct categories present in the data, sorted
pub fn unique_categories(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .map(|tx| tx.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
