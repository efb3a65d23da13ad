//! Transactions record money entering or leaving the business, and when the
//! transaction occurred.
//!
//! This module defines the transaction table, the queries over it, and the
//! pages and endpoints for managing transactions through the web UI.

pub mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod new_transaction_page;
pub mod query;
mod transactions_page;
mod view;

pub use self::core::{
    Transaction, TransactionKind, TransactionUpdate, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::update_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use new_transaction_page::get_new_transaction_page;
pub use query::{SortBy, SortKey, SortOrder, TransactionFilter, get_transactions};
pub use transactions_page::get_transactions_page;
