//! Card components for displaying the transaction summary on the overview page.

use maud::{Markup, html};

use crate::{html::format_currency, overview::summary::TransactionSummary};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-semibold";

/// Renders the overview summary as two rows of metric cards.
///
/// The first row shows the headline figures (count, revenue, expenses, net
/// income) and the second row shows per-transaction statistics (smallest,
/// largest, average amount).
pub(super) fn summary_cards_view(summary: &TransactionSummary) -> Markup {
    let net_income_color = if summary.net_income < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full mx-auto mt-8 mb-8 space-y-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-4 gap-4" {
                (metric_card("Transactions", &summary.count.to_string(), None))
                (metric_card("Total Revenue", &format_currency(summary.total_revenue), None))
                (metric_card("Total Expenses", &format_currency(summary.total_expense), None))
                (metric_card(
                    "Net Income",
                    &format_currency(summary.net_income),
                    Some(net_income_color),
                ))
            }

            h3 class="text-xl font-semibold" { "Transaction Insights" }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (metric_card("Smallest Amount", &format_currency(summary.min_amount), None))
                (metric_card("Largest Amount", &format_currency(summary.max_amount), None))
                (metric_card("Average Amount", &format_currency(summary.avg_amount), None))
            }
        }
    }
}

/// Renders a single metric card with a label and a value.
fn metric_card(label: &str, value: &str, value_color: Option<&str>) -> Markup {
    let value_style = match value_color {
        Some(color) => format!("{CARD_VALUE_STYLE} {color}"),
        None => CARD_VALUE_STYLE.to_owned(),
    };

    html! {
        div class=(CARD_STYLE) aria-label=(format!("{label}: {value}")) {
            span class=(CARD_LABEL_STYLE) { (label) }
            span class=(value_style) { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::overview::summary::TransactionSummary;

    use super::summary_cards_view;

    fn sample_summary() -> TransactionSummary {
        TransactionSummary {
            count: 2,
            total_revenue: 100.0,
            total_expense: 40.0,
            net_income: 60.0,
            min_amount: 40.0,
            max_amount: 100.0,
            avg_amount: 70.0,
        }
    }

    #[test]
    fn cards_show_summary_values() {
        let markup = summary_cards_view(&sample_summary());
        let html = Html::parse_fragment(&markup.into_string());

        let selector = Selector::parse("div[aria-label]").unwrap();
        let labels: Vec<String> = html
            .select(&selector)
            .filter_map(|card| card.value().attr("aria-label"))
            .map(str::to_owned)
            .collect();

        let want = [
            "Transactions: 2",
            "Total Revenue: $100.00",
            "Total Expenses: $40.00",
            "Net Income: $60.00",
            "Smallest Amount: $40.00",
            "Largest Amount: $100.00",
            "Average Amount: $70.00",
        ];

        for label in want {
            assert!(
                labels.iter().any(|got| got == label),
                "want a card labelled {label:?}, got {labels:?}"
            );
        }
    }

    #[test]
    fn negative_net_income_is_highlighted() {
        let summary = TransactionSummary {
            net_income: -20.0,
            ..sample_summary()
        };

        let markup = summary_cards_view(&summary).into_string();

        assert!(
            markup.contains("text-red-600"),
            "want negative net income styled red, got {markup}"
        );
    }
}
