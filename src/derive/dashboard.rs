use crate::models::Transaction;

use super::aggregate::{
    expense_breakdown, monthly_totals, recent_months, unique_categories, CategoryShare,
    MonthlyTotals,
};
use super::filter::{filter_transactions, FilterCriteria};
use super::sort::SortState;
use super::summary::{summarize, Summary};

/// Everything the home screen shows for one filter and sort selection
///
/// The list, summary and expense breakdown follow the filter. The monthly
/// series and the category choices always cover the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Filtered and sorted
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub expense_breakdown: Vec<CategoryShare>,
    /// The most recent months of the unfiltered collection, oldest first
    pub monthly: Vec<MonthlyTotals>,
    pub categories: Vec<String>,
}

impl Dashboard {
    pub fn build(
        transactions: &[Transaction],
        criteria: &FilterCriteria,
        sort: SortState,
        months: usize,
    ) -> Self {
        let filtered = filter_transactions(transactions, criteria);
        let monthly = monthly_totals(transactions);

        Self {
            summary: summarize(&filtered),
            expense_breakdown: expense_breakdown(&filtered),
            transactions: sort.apply(&filtered),
            monthly: recent_months(&monthly, months).to_vec(),
            categories: unique_categories(transactions),
        }
    }
}
