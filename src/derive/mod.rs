//! Pure functions deriving views and aggregates from a transaction collection
//!
//! Nothing here holds state. An empty collection always yields an empty
//! result or zero-valued scalars.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod sort;
pub mod summary;

pub use aggregate::{
    expense_breakdown, expenses_by_category, monthly_totals, recent_months, unique_categories,
    CategoryShare, MonthlyTotals, DEFAULT_CHART_MONTHS,
};
pub use dashboard::Dashboard;
pub use filter::{filter_transactions, matches_search, FilterCriteria};
pub use sort::{sort_transactions, SortDirection, SortField, SortState};
pub use summary::{summarize, Summary};
