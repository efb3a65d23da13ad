//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::AppState;

use super::{
    query::{SortBy, SortKey, SortOrder, TransactionFilter, get_transactions},
    view::transactions_view,
};

/// The filter and sort selection from the page's URL query params.
///
/// Missing params fall back to the defaults (all transactions, sorted by date
/// ascending), mirroring what a fresh page load shows.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQueryParams {
    filter: Option<TransactionFilter>,
    sort: Option<SortKey>,
    order: Option<SortOrder>,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render an overview of the user's transactions.
///
/// A store failure degrades to the empty table rather than an error page: the
/// failure is logged and the page renders with no rows.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query_params): Query<TransactionsQueryParams>,
) -> Response {
    let filter = query_params.filter.unwrap_or_default();
    let sort = SortBy {
        key: query_params.sort.unwrap_or_default(),
        order: query_params.order.unwrap_or_default(),
    };

    let transactions = match state.db_connection.lock() {
        Ok(connection) => {
            get_transactions(filter, Some(sort), &connection).unwrap_or_else(|error| {
                tracing::error!("could not get transactions: {error}");
                Vec::new()
            })
        }
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Vec::new()
        }
    };

    transactions_view(&transactions, filter, sort).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{
            Transaction, TransactionKind, create_transaction,
            query::{SortKey, SortOrder, TransactionFilter},
        },
    };

    use super::{TransactionsQueryParams, TransactionsViewState, get_transactions_page};

    fn get_test_state() -> TransactionsViewState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        TransactionsViewState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn insert(state: &TransactionsViewState, id: &str, amount: f64, kind: TransactionKind) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            &Transaction {
                id: id.to_owned(),
                date: date!(2024 - 01 - 05),
                description: format!("transaction {id}"),
                amount,
                kind,
            },
            &connection,
        )
        .expect("Could not create transaction");
    }

    async fn render_page(state: TransactionsViewState, params: TransactionsQueryParams) -> String {
        let response = get_transactions_page(State(state), Query(params)).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&body).into_owned()
    }

    #[tokio::test]
    async fn page_lists_created_transactions() {
        let state = get_test_state();
        insert(&state, "T1", 100.0, TransactionKind::Revenue);
        insert(&state, "T2", 40.0, TransactionKind::Expense);

        let body = render_page(state, TransactionsQueryParams::default()).await;

        assert!(body.contains("T1"), "want T1 in the rendered page");
        assert!(body.contains("T2"), "want T2 in the rendered page");
    }

    #[tokio::test]
    async fn page_applies_filter_from_query_params() {
        let state = get_test_state();
        insert(&state, "T1", 100.0, TransactionKind::Revenue);
        insert(&state, "T2", 40.0, TransactionKind::Expense);

        let body = render_page(
            state,
            TransactionsQueryParams {
                filter: Some(TransactionFilter::Expense),
                sort: Some(SortKey::Amount),
                order: Some(SortOrder::Descending),
            },
        )
        .await;

        assert!(body.contains("T2"));
        assert!(
            !body.contains("transaction T1"),
            "want revenue transaction filtered out"
        );
    }

    #[tokio::test]
    async fn page_shows_empty_state_for_empty_table() {
        let state = get_test_state();

        let body = render_page(state, TransactionsQueryParams::default()).await;

        assert!(body.contains("No transactions found."));
    }
}
