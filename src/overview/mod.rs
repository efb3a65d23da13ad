//! Overview module
//!
//! Provides a page showing aggregate statistics over the transaction table.

mod cards;
mod handlers;
mod summary;

pub use handlers::get_overview_page;
pub use summary::{TransactionSummary, get_transaction_summary};
