//! Error alerts shown to users after a failed htmx request.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page via `hx-target-error`.

use axum::response::Html;
use maud::html;

/// An error message with details on how to fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        let markup = html! {
            div
                role="alert"
                class=(ALERT_STYLE)
                onclick="this.remove(); document.getElementById('alert-container').classList.add('hidden')"
            {
                p class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    span class="text-sm" { (self.details) }
                }
            }

            // The container starts hidden so an empty container takes no space.
            script { "document.getElementById('alert-container').classList.remove('hidden');" }
        };

        Html(markup.into_string())
    }
}

const ALERT_STYLE: &str = "p-4 mb-4 rounded-lg cursor-pointer text-red-800 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400 border border-red-300 \
    dark:border-red-800";
