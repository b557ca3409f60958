use chrono::NaiveDate;

use crate::models::Transaction;

/// Criteria for narrowing down a transaction list
///
/// Empty strings and `None` dates mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// Matched case-insensitively against title and category
    pub search_term: String,
    /// Matched exactly
    pub category: String,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// The home screen's initial selection: everything dated up to `today`
    pub fn until(today: NaiveDate) -> Self {
        Self {
            end_date: Some(today),
            ..Default::default()
        }
    }

    /// Whether `tx` satisfies every criterion
    pub fn matches(&self, tx: &Transaction) -> bool {
        let matches_category = self.category.is_empty() || tx.category == self.category;
        let after_start = self.start_date.map_or(true, |start| tx.date >= start);
        let before_end = self.end_date.map_or(true, |end| tx.date <= end);

        matches_search(tx, &self.search_term) && matches_category && after_start && before_end
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Whether `term` occurs in the title or category, ignoring case
///
/// An empty term matches everything.
pub fn matches_search(tx: &Transaction, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    tx.title.to_lowercase().contains(&term) || tx.category.to_lowercase().contains(&term)
}

/// Transactions matching `criteria`, in input order
pub fn filter_transactions(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| criteria.matches(tx))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionType};
    use rust_decimal_macros::dec;

    fn tx(title: &str, category: &str) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            title: title.to_string(),
            amount: dec!(10),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            tx_type: TransactionType::Expense,
        }
    }

    #[test]
    fn test_search_ignores_case() {
        let t = tx("Weekly GROCERIES", "Food");
        assert!(matches_search(&t, "groceries"));
        assert!(matches_search(&t, "FOO"));
        assert!(!matches_search(&t, "rent"));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert!(matches_search(&tx("", ""), ""));
    }

    #[test]
    fn test_category_must_match_exactly() {
        let criteria = FilterCriteria {
            category: "food".to_string(),
            ..Default::default()
        };
        assert!(!criteria.matches(&tx("Lunch", "Food")));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let criteria = FilterCriteria {
            start_date: Some(day),
            end_date: Some(day),
            ..Default::default()
        };
        assert!(criteria.matches(&tx("Lunch", "Food")));
    }

    #[test]
    fn test_until_hides_future_entries() {
        let criteria = FilterCriteria::until(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert!(!criteria.matches(&tx("Lunch", "Food")));

        let criteria = FilterCriteria::until(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(criteria.matches(&tx("Lunch", "Food")));
    }

    #[test]
    fn test_default_criteria_is_empty() {
        assert!(FilterCriteria::default().is_empty());
    }
}
