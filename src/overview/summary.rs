//! Aggregate statistics computed over the full transaction table.

use rusqlite::Connection;

use crate::Error;

/// Aggregate statistics over the full, unfiltered transaction set.
///
/// An empty table reports zero for every field rather than a null aggregate,
/// so the overview page always has numbers to show.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransactionSummary {
    /// The total number of transactions.
    pub count: u32,
    /// The sum of all revenue amounts.
    pub total_revenue: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_revenue - total_expense`. Negative when expenses exceed revenue.
    pub net_income: f64,
    /// The smallest transaction amount regardless of type.
    pub min_amount: f64,
    /// The largest transaction amount regardless of type.
    pub max_amount: f64,
    /// The average transaction amount regardless of type.
    pub avg_amount: f64,
}

/// Compute aggregate statistics over the full transaction table.
///
/// Revenue and expense totals sum the amounts of the matching type;
/// min/max/average cover every transaction regardless of type. Each nullable
/// SQL aggregate is coalesced to zero so an empty table reports all zeroes.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_transaction_summary(connection: &Connection) -> Result<TransactionSummary, Error> {
    let mut summary = connection.query_row(
        "SELECT
            COUNT(*),
            COALESCE(SUM(CASE WHEN type = 'Revenue' THEN amount ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN type = 'Expense' THEN amount ELSE 0 END), 0),
            COALESCE(MIN(amount), 0),
            COALESCE(MAX(amount), 0),
            COALESCE(AVG(amount), 0)
        FROM transactions",
        [],
        |row| {
            Ok(TransactionSummary {
                count: row.get(0)?,
                total_revenue: row.get(1)?,
                total_expense: row.get(2)?,
                net_income: 0.0,
                min_amount: row.get(3)?,
                max_amount: row.get(4)?,
                avg_amount: row.get(5)?,
            })
        },
    )?;

    // Derived from the totals rather than summed separately so that
    // net_income always equals total_revenue - total_expense.
    summary.net_income = summary.total_revenue - summary.total_expense;

    Ok(summary)
}
