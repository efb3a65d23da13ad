//! HTML rendering for the transactions page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

use super::{
    core::{Transaction, TransactionKind},
    query::{SortBy, SortKey, SortOrder, TransactionFilter},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
        TransactionKind::Revenue => "text-green-700 dark:text-green-300",
    }
}

fn truncate_description(description: &str) -> String {
    let grapheme_count = description.graphemes(true).count();

    if grapheme_count <= MAX_DESCRIPTION_GRAPHEMES {
        return description.to_owned();
    }

    let truncated: String = description
        .graphemes(true)
        .take(MAX_DESCRIPTION_GRAPHEMES - 1)
        .collect();

    format!("{truncated}\u{2026}")
}

pub(crate) fn transactions_view(
    transactions: &[Transaction],
    filter: TransactionFilter,
    sort: SortBy,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 lg:max-w-5xl lg:w-full lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }
                }

                (filter_sort_controls(filter, sort))

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden"
                {
                    @if transactions.is_empty() {
                        p class="p-4 text-gray-600 dark:text-gray-400"
                        {
                            "No transactions found."
                        }
                    } @else {
                        (transaction_table(transactions))
                    }
                }
            }
        }
    };

    base("Transactions", &content)
}

/// The filter and sort controls, submitted as GET query params so the
/// selection survives refreshes and can be linked to.
fn filter_sort_controls(filter: TransactionFilter, sort: SortBy) -> Markup {
    let select_style = "rounded border border-gray-300 dark:border-gray-600 \
        bg-white dark:bg-gray-700 p-2 text-sm";

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="filter" class="block text-sm mb-1" { "Filter by type" }

                select name="filter" id="filter" class=(select_style)
                {
                    (filter_option(TransactionFilter::All, "All", filter))
                    (filter_option(TransactionFilter::Revenue, "Revenue", filter))
                    (filter_option(TransactionFilter::Expense, "Expense", filter))
                }
            }

            div
            {
                label for="sort" class="block text-sm mb-1" { "Sort by" }

                select name="sort" id="sort" class=(select_style)
                {
                    (sort_key_option(SortKey::Date, "Date", sort.key))
                    (sort_key_option(SortKey::Amount, "Amount", sort.key))
                }
            }

            div
            {
                label for="order" class="block text-sm mb-1" { "Sort order" }

                select name="order" id="order" class=(select_style)
                {
                    (sort_order_option(SortOrder::Ascending, "Ascending", sort.order))
                    (sort_order_option(SortOrder::Descending, "Descending", sort.order))
                }
            }

            button
                type="submit"
                class="px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 \
                    hover:dark:bg-blue-700 text-white rounded text-sm"
            {
                "Apply"
            }
        }
    }
}

fn filter_option(value: TransactionFilter, label: &str, selected: TransactionFilter) -> Markup {
    html! {
        option value=(value.as_query_value()) selected[value == selected] { (label) }
    }
}

fn sort_key_option(value: SortKey, label: &str, selected: SortKey) -> Markup {
    html! {
        option value=(value.as_query_value()) selected[value == selected] { (label) }
    }
}

fn sort_order_option(value: SortOrder, label: &str, selected: SortOrder) -> Markup {
    html! {
        option value=(value.as_query_value()) selected[value == selected] { (label) }
    }
}

fn transaction_table(transactions: &[Transaction]) -> Markup {
    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    (transaction_table_row(transaction))
                }
            }
        }
    }
}

fn transaction_table_row(transaction: &Transaction) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
    let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION_API, &transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            th scope="row" class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) title=(transaction.description)
            {
                (truncate_description(&transaction.description))
            }
            td class=(format!("{TABLE_CELL_STYLE} {}", amount_class(transaction.kind)))
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        class=(BUTTON_DELETE_STYLE)
                        hx-delete=(delete_url)
                        hx-target="closest tr"
                        hx-swap="outerHTML"
                        hx-confirm=(format!("Delete transaction {}?", transaction.id))
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;
    use unicode_segmentation::UnicodeSegmentation;

    use crate::transaction::{
        core::{Transaction, TransactionKind},
        query::{SortBy, TransactionFilter},
    };

    use super::{MAX_DESCRIPTION_GRAPHEMES, transactions_view, truncate_description};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: "T1".to_owned(),
                date: date!(2024 - 01 - 05),
                description: "Sale".to_owned(),
                amount: 100.0,
                kind: TransactionKind::Revenue,
            },
            Transaction {
                id: "T2".to_owned(),
                date: date!(2024 - 01 - 06),
                description: "Rent".to_owned(),
                amount: 40.0,
                kind: TransactionKind::Expense,
            },
        ]
    }

    #[test]
    fn view_renders_one_row_per_transaction() {
        let markup = transactions_view(
            &sample_transactions(),
            TransactionFilter::All,
            SortBy::default(),
        );

        let document = Html::parse_document(&markup.into_string());
        let selector = Selector::parse("tbody tr").unwrap();

        assert_eq!(document.select(&selector).count(), 2);
    }

    #[test]
    fn view_renders_formatted_amounts() {
        let markup = transactions_view(
            &sample_transactions(),
            TransactionFilter::All,
            SortBy::default(),
        );
        let rendered = markup.into_string();

        assert!(rendered.contains("$100.00"));
        assert!(rendered.contains("$40.00"));
    }

    #[test]
    fn view_shows_empty_state_without_transactions() {
        let markup = transactions_view(&[], TransactionFilter::All, SortBy::default());
        let rendered = markup.into_string();

        assert!(rendered.contains("No transactions found."));
    }

    #[test]
    fn short_descriptions_are_not_truncated() {
        let got = truncate_description("Sale");

        assert_eq!(got, "Sale");
    }

    #[test]
    fn long_descriptions_are_truncated_with_ellipsis() {
        let description = "x".repeat(MAX_DESCRIPTION_GRAPHEMES + 10);

        let got = truncate_description(&description);

        assert!(got.ends_with('\u{2026}'));
        assert_eq!(got.graphemes(true).count(), MAX_DESCRIPTION_GRAPHEMES);
    }
}
