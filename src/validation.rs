use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Transaction, TransactionFormData, TransactionId, TransactionType};

/// Input fields of the transaction form that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Title,
    Amount,
    Category,
    Date,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Title => "title",
            FormField::Amount => "amount",
            FormField::Category => "category",
            FormField::Date => "date",
        };
        f.pad(name)
    }
}

/// Every problem found in a submitted form, one message per field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid transaction: {}", describe(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, &'static str>,
}

fn describe(errors: &BTreeMap<FormField, &'static str>) -> String {
    errors
        .values()
        .copied()
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// The message for `field`, if it failed
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Raw, unvalidated input of the add and edit flows
///
/// Everything the user types arrives as text. [`TransactionForm::validate`]
/// is the only way to turn it into data the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub title: String,
    pub amount: String,
    pub category: String,
    /// Expected as `YYYY-MM-DD`
    pub date: String,
    pub tx_type: TransactionType,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: String::new(),
            date: String::new(),
            tx_type: TransactionType::Expense,
        }
    }
}

impl TransactionForm {
    /// A blank expense form dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// A form pre-filled with an existing transaction, for editing
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            title: tx.title.clone(),
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            tx_type: tx.tx_type,
        }
    }

    /// Check every field, reporting all failures at once
    pub fn validate(&self) -> Result<TransactionFormData, ValidationErrors> {
        let mut errors = BTreeMap::new();

        if self.title.trim().is_empty() {
            errors.insert(FormField::Title, "Title is required");
        }

        let amount = match Decimal::from_str(self.amount.trim()) {
            Ok(amount) if amount > Decimal::ZERO => Some(amount),
            _ => {
                errors.insert(FormField::Amount, "Amount must be greater than 0");
                None
            }
        };

        if self.category.is_empty() {
            errors.insert(FormField::Category, "Category is required");
        }

        let date = if self.date.trim().is_empty() {
            errors.insert(FormField::Date, "Date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert(FormField::Date, "Date must be in YYYY-MM-DD format");
                    None
                }
            }
        };

        match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(TransactionFormData {
                title: self.title.clone(),
                amount,
                category: self.category.clone(),
                date,
                tx_type: self.tx_type,
            }),
            _ => Err(ValidationErrors { errors }),
        }
    }

    /// Validate for the edit flow, keeping the transaction's existing id
    pub fn validate_edit(&self, id: TransactionId) -> Result<Transaction, ValidationErrors> {
        self.validate().map(|form_data| form_data.with_id(id))
    }
}
