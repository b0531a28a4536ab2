//! Ledger Insights is a small web dashboard for exploring a transaction ledger.
//!
//! The ledger is read once from a CSV file at startup, enriched with calendar
//! fields, and then served as an HTML page with three filter controls (year,
//! merchant and customer) and four charts. Every change to a control re-runs
//! the filter and the chart aggregations over the immutable ledger.

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
mod dashboard;
mod endpoints;
mod error_pages;
mod filter;
mod html;
mod ledger;
mod logging;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    DashboardModel, HISTOGRAM_BIN_COUNT, Histogram, MerchantAmount, MerchantCount, MonthlyCount,
    on_selection_changed,
};
pub use filter::{Criterion, Selection, SelectionQuery, Selector, filter_transactions};
pub use ledger::{
    CalendarFields, LoadError, Ledger, Transaction, YearMonth, load_ledger, load_ledger_from_reader,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{alert::Alert, error_pages::InternalServerError};

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
    /// The ledger could not be loaded.
    ///
    /// This only happens at startup and is fatal: the server exits before
    /// serving any requests.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A selector value in a request could not be interpreted, e.g. a year
    /// that is not a number.
    ///
    /// Handlers never return this error to the client. It is logged and the
    /// selection is downgraded to one that matches no transactions.
    #[error("invalid value \"{value}\" for the {field} selector")]
    InvalidSelection {
        /// The name of the form field, e.g. "years".
        field: &'static str,
        /// The raw value that was received.
        value: String,
    },

    /// The options for a chart could not be serialized to JSON.
    #[error("could not serialize chart options as JSON: {0}")]
    ChartSerialization(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::ChartSerialization(reason) => {
                tracing::error!("Could not render the dashboard charts: {reason}");
                InternalServerError {
                    description: "Could not draw the charts",
                    fix: "The dashboard data could not be prepared for display. \
                        Check the server logs for more details.",
                }
                .into_response()
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    ///
    /// The alert is swapped into the page's alert container so the rest of the
    /// dashboard, including the controls, stays usable.
    fn into_alert_response(self) -> Response {
        tracing::error!("Could not update the dashboard: {self}");

        let alert = match self {
            Error::ChartSerialization(_) => Alert::Error {
                message: "Could not draw the charts".to_owned(),
                details: "The filtered data could not be prepared for display. \
                    Try a different selection or check the server logs."
                    .to_owned(),
            },
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, alert.into_html()).into_response()
    }
}
