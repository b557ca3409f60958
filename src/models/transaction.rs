use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Opaque transaction identifier
///
/// Fresh ids are UUID v4 strings, but any string loaded from storage is kept as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a new globally unique id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }
}

/// Payload of the add flow: a transaction before the store assigns its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    pub title: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
}

impl TransactionFormData {
    /// Attach an id, producing a full transaction
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date,
            tx_type: self.tx_type,
        }
    }
}

impl From<Transaction> for TransactionFormData {
    fn from(tx: Transaction) -> Self {
        Self {
            title: tx.title,
            amount: tx.amount,
            category: tx.category,
            date: tx.date,
            tx_type: tx.tx_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = TransactionId::generate();
        let b = TransactionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_json_shape() {
        let tx = Transaction {
            id: TransactionId::from("abc"),
            title: "Lunch".to_string(),
            amount: dec!(12.50),
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            tx_type: TransactionType::Expense,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["type"], "expense");
    }

    #[test]
    fn test_amount_accepts_json_number() {
        let json = r#"{"id":"1","title":"Pay","amount":1000.25,"category":"Salary","date":"2024-01-05","type":"income"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, dec!(1000.25));
        assert!(tx.is_income());
    }
}
