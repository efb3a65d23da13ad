//! Defines the endpoint for updating an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    transaction::core::{TransactionKind, TransactionUpdate, update_transaction},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for updating a transaction.
///
/// The transaction ID is taken from the URL path and cannot be changed.
#[derive(Debug, Deserialize)]
pub struct EditTransactionForm {
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// Whether the transaction is revenue or an expense.
    pub kind: TransactionKind,
}

/// A route handler for updating a transaction, redirects to transactions view on success.
pub async fn update_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<String>,
    Form(form): Form<EditTransactionForm>,
) -> Response {
    let update = TransactionUpdate {
        date: form.date,
        description: form.description,
        amount: form.amount,
        kind: form.kind,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_transaction(&transaction_id, &update, &connection) {
        tracing::error!("could not update transaction {transaction_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction, get_transaction},
    };

    use super::{EditTransactionForm, EditTransactionState, update_transaction_endpoint};

    fn get_test_state() -> EditTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn insert_sample_transaction(state: &EditTransactionState) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            &Transaction {
                id: "T1".to_owned(),
                date: date!(2024 - 01 - 05),
                description: "before".to_owned(),
                amount: 10.0,
                kind: TransactionKind::Revenue,
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = get_test_state();
        insert_sample_transaction(&state);

        let form = EditTransactionForm {
            date: date!(2024 - 02 - 06),
            description: "after".to_owned(),
            amount: 25.5,
            kind: TransactionKind::Expense,
        };
        let response = update_transaction_endpoint(
            State(state.clone()),
            Path("T1".to_owned()),
            Form(form),
        )
        .await
        .into_response();

        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(location, "/transactions");

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction("T1", &connection).unwrap();
        assert_eq!(transaction.date, date!(2024 - 02 - 06));
        assert_eq!(transaction.description, "after");
        assert_eq!(transaction.amount, 25.5);
        assert_eq!(transaction.kind, TransactionKind::Expense);
    }

    #[tokio::test]
    async fn updating_missing_transaction_responds_with_not_found() {
        let state = get_test_state();

        let form = EditTransactionForm {
            date: date!(2024 - 02 - 06),
            description: "after".to_owned(),
            amount: 25.5,
            kind: TransactionKind::Expense,
        };
        let response =
            update_transaction_endpoint(State(state), Path("missing".to_owned()), Form(form))
                .await
                .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updating_with_invalid_amount_responds_with_bad_request() {
        let state = get_test_state();
        insert_sample_transaction(&state);

        let form = EditTransactionForm {
            date: date!(2024 - 02 - 06),
            description: "after".to_owned(),
            amount: 0.0,
            kind: TransactionKind::Expense,
        };
        let response = update_transaction_endpoint(
            State(state.clone()),
            Path("T1".to_owned()),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The stored transaction must be unchanged.
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction("T1", &connection).unwrap();
        assert_eq!(transaction.amount, 10.0);
    }
}
