pub mod category;
pub mod transaction;

pub use category::{is_known_category, CATEGORIES};
pub use transaction::{Transaction, TransactionFormData, TransactionId, TransactionType};
