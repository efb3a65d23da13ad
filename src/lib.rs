//! FinTrack is a web app for tracking revenue and expense transactions.
//!
//! This library provides a REST API that directly serves HTML pages: an
//! overview page with aggregate statistics over the transaction table and a
//! transactions page with forms for creating, editing and deleting records.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod overview;
mod routing;
mod shared_templates;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{
    alert::AlertTemplate,
    internal_server_error::render_internal_server_error,
    not_found::get_404_not_found_response,
    shared_templates::render,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty (or whitespace-only) string was used as a transaction ID.
    ///
    /// Transaction IDs are supplied by the caller and act as the primary key,
    /// so they must contain at least one non-whitespace character.
    #[error("transaction ID cannot be empty")]
    EmptyTransactionId,

    /// A zero or negative amount was used to create or update a transaction.
    ///
    /// Amounts are stored as positive values. The sign of a transaction is
    /// derived from its type when aggregating, so a negative stored amount
    /// would be double-counted.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// The specified transaction ID already exists in the database.
    ///
    /// The client should choose a different ID, or edit or delete the
    /// existing transaction.
    #[error("a transaction with the ID \"{0}\" already exists in the database")]
    DuplicateTransactionId(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyTransactionId => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid transaction ID",
                    "The transaction ID cannot be empty. \
                    Enter a unique ID for the transaction.",
                )
                .into_markup(),
            ),
            Error::NonPositiveAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!(
                        "{amount} is not a valid amount. \
                        Enter an amount greater than zero."
                    ),
                )
                .into_markup(),
            ),
            Error::DuplicateTransactionId(id) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Duplicate transaction ID",
                    &format!(
                        "The transaction ID \"{id}\" already exists in the database. \
                        Choose a different ID, or edit or delete the existing transaction.",
                    ),
                )
                .into_markup(),
            ),
            Error::UpdateMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_markup(),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_markup(),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_markup(),
            ),
        }
    }
}
