#![allow(dead_code)]

use chrono::NaiveDate;
use finance_tracker::error::{Result, TrackerError};
use finance_tracker::models::{Transaction, TransactionFormData, TransactionId, TransactionType};
use finance_tracker::persistence::PersistenceBackend;
use rust_decimal::Decimal;

/// Parse a `YYYY-MM-DD` literal
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Helper to create form data with all fields
pub fn make_form(
    tx_type: TransactionType,
    title: &str,
    amount: Decimal,
    category: &str,
    on: &str,
) -> TransactionFormData {
    TransactionFormData {
        title: title.to_string(),
        amount,
        category: category.to_string(),
        date: date(on),
        tx_type,
    }
}

/// Helper to create a transaction with a fixed id
pub fn make_transaction(
    id: &str,
    tx_type: TransactionType,
    title: &str,
    amount: Decimal,
    category: &str,
    on: &str,
) -> Transaction {
    make_form(tx_type, title, amount, category, on).with_id(TransactionId::from(id))
}

pub fn make_income(id: &str, amount: Decimal, on: &str) -> Transaction {
    make_transaction(id, TransactionType::Income, "Salary", amount, "Salary", on)
}

pub fn make_expense(id: &str, amount: Decimal, category: &str, on: &str) -> Transaction {
    make_transaction(id, TransactionType::Expense, category, amount, category, on)
}

/// One income in January and two food expenses across January and February
pub fn scenario() -> Vec<Transaction> {
    vec![
        make_income("jan-pay", Decimal::from(1000), "2024-01-05"),
        make_expense("jan-food", Decimal::from(300), "Food", "2024-01-10"),
        make_expense("feb-food", Decimal::from(200), "Food", "2024-02-01"),
    ]
}

/// Backend whose writes always fail, counting the attempts
#[derive(Default)]
pub struct FailingPersistence {
    pub save_attempts: usize,
}

impl PersistenceBackend for FailingPersistence {
    fn load(&self) -> Result<Vec<Transaction>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _transactions: &[Transaction]) -> Result<()> {
        self.save_attempts += 1;
        Err(TrackerError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "quota exceeded",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_make_expense() {
        let tx = make_expense("x", dec!(12.5), "Food", "2024-03-01");
        assert_eq!(tx.id.as_str(), "x");
        assert_eq!(tx.amount, dec!(12.5));
        assert_eq!(tx.category, "Food");
        assert!(tx.is_expense());
    }

    #[test]
    fn test_scenario_shape() {
        let txs = scenario();
        assert_eq!(txs.len(), 3);
        assert!(txs[0].is_income());
        assert!(txs[1..].iter().all(|tx| tx.is_expense()));
    }
}
