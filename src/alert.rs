//! Alert fragments for displaying success and error messages to users.
//!
//! Alerts render into the fixed `#alert-container` element of the base layout
//! via an htmx out-of-band swap, so any endpoint can surface an inline message
//! without replacing the page.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
#[derive(Debug, Clone)]
pub struct AlertTemplate<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_markup(self) -> Markup {
        let (container_style, icon) = match self.alert_type {
            AlertType::Success => (
                "flex items-start gap-3 p-4 text-sm rounded border \
                border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400",
                "\u{2713}",
            ),
            AlertType::Error => (
                "flex items-start gap-3 p-4 text-sm rounded border \
                border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                "\u{26a0}",
            ),
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(container_style)
                {
                    span aria-hidden="true" { (icon) }

                    div
                    {
                        p class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p { (self.details) }
                        }
                    }
                }
            }
        }
    }
}
