/// Categories offered by the transaction form
///
/// The store accepts any category string; this list only feeds input choices.
pub const CATEGORIES: [&str; 13] = [
    "Food",
    "Transportation",
    "Housing",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
    "Education",
    "Personal",
    "Salary",
    "Investment",
    "Gift",
    "Other",
];

/// Whether `category` is one of the form's predefined choices
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}
