//! Defines the route handler for the page for creating a new transaction.

use axum::{http::StatusCode, response::Response};
use maud::html;
use time::OffsetDateTime;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_templates::render,
    transaction::core::TransactionKind,
};

use super::form::{TransactionFormDefaults, transaction_form_fields};

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let defaults = TransactionFormDefaults {
        id: None,
        id_editable: true,
        kind: TransactionKind::Revenue,
        amount: None,
        date: OffsetDateTime::now_utc().date(),
        description: None,
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "Create New Transaction" }

                form
                    class="space-y-4"
                    hx-post=(endpoints::TRANSACTIONS_API)
                    hx-swap="none"
                {
                    (transaction_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Add Transaction"
                    }
                }
            }
        }
    };

    render(StatusCode::OK, base("New Transaction", &content))
}
