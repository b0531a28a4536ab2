//! Alert messages swapped into the page's alert container by htmx.

use maud::{Markup, html};

/// A message shown to the user in the alert container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Something went wrong while updating the page.
    Error {
        /// A short summary of the problem.
        message: String,
        /// What happened and what the user can do about it.
        details: String,
    },
}

impl Alert {
    /// Render the alert with a button that dismisses it.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Error { message, details } => html!(
                div
                    class="alert alert-error"
                    role="alert"
                {
                    div class="alert-body"
                    {
                        p class="alert-message" { (message) }

                        @if !details.is_empty() {
                            p class="alert-details" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="alert-dismiss"
                        aria-label="Dismiss"
                        onclick="this.closest('.alert').remove()"
                    {
                        "×"
                    }
                }
            ),
        }
    }
}
