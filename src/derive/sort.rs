use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Transaction;

/// Field a transaction list can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "category" => Ok(SortField::Category),
            "title" => Ok(SortField::Title),
            other => Err(format!(
                "unknown sort field '{}', expected date, amount, category or title",
                other
            )),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}', expected asc or desc", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Date => "date",
            SortField::Amount => "amount",
            SortField::Category => "category",
            SortField::Title => "title",
        };
        f.pad(name)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.pad("asc"),
            SortDirection::Desc => f.pad("desc"),
        }
    }
}

/// Sort selection as driven by clickable list headers
///
/// Selecting the current field flips the direction; selecting another field
/// switches to it, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn select(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        sort_transactions(transactions, self.field, self.direction)
    }
}

/// Text ordering that ignores case first and falls back to the exact text
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_by(field: SortField, a: &Transaction, b: &Transaction) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Category => compare_text(&a.category, &b.category),
        SortField::Title => compare_text(&a.title, &b.title),
    }
}

/// A sorted copy of `transactions`
///
/// The sort is stable in both directions: transactions with equal keys keep
/// their input order.
pub fn sort_transactions(
    transactions: &[Transaction],
    field: SortField,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match direction {
        SortDirection::Asc => sorted.sort_by(|a, b| compare_by(field, a, b)),
        SortDirection::Desc => sorted.sort_by(|a, b| compare_by(field, b, a)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_text_folds_case() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Zoo", "apple"), Ordering::Greater);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_select_toggles_or_resets() {
        let state = SortState::default();
        assert_eq!(state.field, SortField::Date);
        assert_eq!(state.direction, SortDirection::Desc);

        let toggled = state.select(SortField::Date);
        assert_eq!(toggled.direction, SortDirection::Asc);

        let switched = toggled.select(SortField::Amount);
        assert_eq!(switched.field, SortField::Amount);
        assert_eq!(switched.direction, SortDirection::Desc);
    }

    #[test]
    fn test_parse_sort_options() {
        assert_eq!("Amount".parse::<SortField>().unwrap(), SortField::Amount);
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("size".parse::<SortField>().is_err());
    }
}
