//! Defines the route handler for the page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_templates::render,
    transaction::core::get_transaction,
};

use super::form::{TransactionFormDefaults, transaction_form_fields};

/// The state needed to render the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a transaction, pre-filled with its current values.
///
/// Responds with the 404 page if the transaction does not exist.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<String>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let transaction = match get_transaction(&transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };
    drop(connection);

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let defaults = TransactionFormDefaults {
        id: Some(&transaction.id),
        // The ID is the primary key, so the edit form must not change it.
        id_editable: false,
        kind: transaction.kind,
        amount: Some(transaction.amount),
        date: transaction.date,
        description: Some(&transaction.description),
    };

    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION_API, &transaction.id);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Edit Transaction" }

                form
                    class="space-y-4"
                    hx-put=(update_endpoint)
                    hx-swap="none"
                {
                    (transaction_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Save Changes"
                    }
                }
            }
        }
    };

    render(StatusCode::OK, base("Edit Transaction", &content))
}
