//! The route handler for the overview page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    overview::{
        cards::summary_cards_view,
        summary::{TransactionSummary, get_transaction_summary},
    },
    shared_templates::render,
};

/// The state needed for the overview page.
#[derive(Debug, Clone)]
pub struct OverviewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OverviewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with aggregate statistics over all transactions.
///
/// If the summary cannot be computed the page still renders, showing all
/// zeroes, and the cause is logged.
pub async fn get_overview_page(State(state): State<OverviewState>) -> Response {
    let summary = match state.db_connection.lock() {
        Ok(connection) => get_transaction_summary(&connection).unwrap_or_else(|error| {
            tracing::error!("could not compute transaction summary: {error}");
            TransactionSummary::default()
        }),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            TransactionSummary::default()
        }
    };

    let nav_bar = NavBar::new(endpoints::OVERVIEW_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-4xl space-y-4"
            {
                h1 class="text-xl font-bold" { "Overview" }

                (summary_cards_view(&summary))
            }
        }
    };

    render(StatusCode::OK, base("Overview", &content))
}
