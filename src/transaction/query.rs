//! Database query helpers for listing transactions with filtering and sorting.

use rusqlite::Connection;
use serde::Deserialize;

use crate::Error;

use super::core::{Transaction, TransactionKind, map_transaction_row};

/// Narrows a transaction listing by transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    /// Include every transaction.
    #[default]
    All,
    /// Include only revenue transactions.
    Revenue,
    /// Include only expense transactions.
    Expense,
}

impl TransactionFilter {
    /// The value used for this filter in URL query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Revenue => "revenue",
            TransactionFilter::Expense => "expense",
        }
    }
}

/// The column to sort a transaction listing by.
///
/// Sort keys form a closed set mapped to fixed column references, caller text
/// is never interpolated into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by the transaction date.
    #[default]
    Date,
    /// Sort by the transaction amount.
    Amount,
}

impl SortKey {
    /// The value used for this sort key in URL query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
        }
    }
}

/// The order to sort transactions in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Sort in order of decreasing value.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The value used for this sort order in URL query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortBy {
    /// The column to sort by.
    pub key: SortKey,
    /// The direction to sort in.
    pub order: SortOrder,
}

/// Get transactions with optional filtering by type and sorting.
///
/// `None` for `sort` returns transactions in the order they are stored.
/// Sorted results break ties by transaction ID to keep the listing stable
/// across refreshes.
///
/// An empty table yields an empty vector, not an error.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions(
    filter: TransactionFilter,
    sort: Option<SortBy>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query = String::from(
        "SELECT transaction_id, transaction_date, description, amount, type FROM transactions",
    );

    let filter_kind = match filter {
        TransactionFilter::All => None,
        TransactionFilter::Revenue => Some(TransactionKind::Revenue),
        TransactionFilter::Expense => Some(TransactionKind::Expense),
    };

    if filter_kind.is_some() {
        query.push_str(" WHERE type = ?1");
    }

    if let Some(sort) = sort {
        query.push(' ');
        query.push_str(order_clause(sort));
    }

    let mut statement = connection.prepare(&query)?;

    let rows = match filter_kind {
        Some(kind) => statement.query_map([kind], map_transaction_row)?,
        None => statement.query_map([], map_transaction_row)?,
    };

    rows.map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Map a sort selection to a fixed, pre-validated `ORDER BY` fragment.
fn order_clause(sort: SortBy) -> &'static str {
    match (sort.key, sort.order) {
        (SortKey::Date, SortOrder::Ascending) => {
            "ORDER BY transaction_date ASC, transaction_id ASC"
        }
        (SortKey::Date, SortOrder::Descending) => {
            "ORDER BY transaction_date DESC, transaction_id ASC"
        }
        (SortKey::Amount, SortOrder::Ascending) => "ORDER BY amount ASC, transaction_id ASC",
        (SortKey::Amount, SortOrder::Descending) => "ORDER BY amount DESC, transaction_id ASC",
    }
}
