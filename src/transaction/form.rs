//! The shared form fields for creating and editing transactions.

use maud::{Markup, html};
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::TransactionKind,
};

/// The default values pre-filled into a transaction form.
pub struct TransactionFormDefaults<'a> {
    /// Pre-filled transaction ID, `None` for the create form.
    pub id: Option<&'a str>,
    /// Whether the ID field accepts input. The ID is immutable once created,
    /// so the edit form disables it.
    pub id_editable: bool,
    pub kind: TransactionKind,
    pub amount: Option<f64>,
    pub date: Date,
    pub description: Option<&'a str>,
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.kind, TransactionKind::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");
    let description_placeholder = defaults.description.unwrap_or("Description");

    html! {
        div
        {
            label
                for="id"
                class=(FORM_LABEL_STYLE)
            {
                "Transaction ID"
            }

            input
                name="id"
                id="id"
                type="text"
                placeholder="A unique identifier"
                value=[defaults.id]
                required
                disabled[!defaults.id_editable]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-revenue"
                        type="radio"
                        value="Revenue"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-revenue"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Revenue"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="kind"
                        id="transaction-kind-expense"
                        type="radio"
                        value="Expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-kind-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                placeholder=(amount_placeholder)
                min="0.01"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder=(description_placeholder)
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::{TransactionFormDefaults, transaction_form_fields};
    use crate::transaction::core::TransactionKind;

    fn render_fields(defaults: &TransactionFormDefaults) -> Html {
        let fields = transaction_form_fields(defaults);
        let markup = maud::html! { form { (fields) } };
        Html::parse_document(&markup.into_string())
    }

    fn empty_defaults(kind: TransactionKind) -> TransactionFormDefaults<'static> {
        TransactionFormDefaults {
            id: None,
            id_editable: true,
            kind,
            amount: None,
            date: date!(2024 - 01 - 05),
            description: None,
        }
    }

    #[test]
    fn form_fields_check_selected_kind() {
        let cases = [
            (TransactionKind::Revenue, "Revenue"),
            (TransactionKind::Expense, "Expense"),
        ];

        for (kind, expected) in cases {
            let html = render_fields(&empty_defaults(kind));
            assert_checked_value(&html, expected);
        }
    }

    #[test]
    fn edit_form_disables_id_field() {
        let defaults = TransactionFormDefaults {
            id: Some("T1"),
            id_editable: false,
            ..empty_defaults(TransactionKind::Revenue)
        };

        let html = render_fields(&defaults);

        let selector = Selector::parse("input#id").unwrap();
        let input = html.select(&selector).next().expect("want an ID input");
        assert!(input.value().attr("disabled").is_some());
        assert_eq!(input.value().attr("value"), Some("T1"));
    }

    #[test]
    fn create_form_leaves_id_field_editable() {
        let html = render_fields(&empty_defaults(TransactionKind::Revenue));

        let selector = Selector::parse("input#id").unwrap();
        let input = html.select(&selector).next().expect("want an ID input");
        assert!(input.value().attr("disabled").is_none());
    }

    fn assert_checked_value(document: &Html, expected: &str) {
        let selector = Selector::parse("input[type=radio][name=kind]").unwrap();
        let inputs = document.select(&selector).collect::<Vec<_>>();
        assert_eq!(
            inputs.len(),
            2,
            "want 2 transaction kind inputs, got {}",
            inputs.len()
        );

        let checked = inputs
            .iter()
            .find(|input| input.value().attr("checked").is_some())
            .and_then(|input| input.value().attr("value"));
        assert_eq!(
            checked,
            Some(expected),
            "want checked transaction kind to be {expected}, got {checked:?}"
        );
    }
}
