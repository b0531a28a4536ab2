//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and the chart fragment
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handlers

use std::sync::Arc;

use axum::{
    extract::{FromRef, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Query;
use axum_htmx::{HxPushUrl, HxRequest};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        charts::{DashboardChart, build_dashboard_charts, charts_view},
        controls::{CHARTS_CONTAINER_ID, ControlOptions, controls_view},
        model::{DashboardModel, on_selection_changed},
    },
    endpoints,
    filter::{Selection, SelectionQuery},
    html::{base, echarts_script, format_count, format_currency},
    ledger::Ledger,
};

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transactions loaded at startup.
    pub ledger: Arc<Ledger>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Display the dashboard with the controls set from the query string.
///
/// With no query string every control is set to its "All" option.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, Error> {
    let selection = query.into_selection();
    let model = on_selection_changed(&state.ledger, &selection);
    let charts = build_dashboard_charts(&model)?;
    let options = ControlOptions::from_ledger(&state.ledger);

    Ok(dashboard_view(&options, &selection, &model, &charts).into_response())
}

/// Render the charts for the selection sent by the dashboard controls.
///
/// The response replaces the chart container and updates the browser URL so
/// the selection can be bookmarked. Requests that did not come from htmx are
/// redirected to the full page with the same selection.
pub async fn get_dashboard_charts(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<SelectionQuery>,
) -> Response {
    let page_url = endpoints::with_query(endpoints::ROOT, raw_query.as_deref());

    if !is_htmx_request {
        return Redirect::to(&page_url).into_response();
    }

    let selection = query.into_selection();
    let model = on_selection_changed(&state.ledger, &selection);

    match build_dashboard_charts(&model) {
        Ok(charts) => (
            HxPushUrl(page_url),
            html!(
                (charts_content(&model, &charts))

                // Clear any alert left over from a failed update
                div
                    id="alert-container"
                    class="alert-container"
                    hx-swap-oob="true"
                {}
            ),
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn dashboard_view(
    options: &ControlOptions,
    selection: &Selection,
    model: &DashboardModel,
    charts: &[DashboardChart],
) -> Markup {
    let content = html!(
        main class="dashboard"
        {
            h1 class="dashboard-title" { "Transaction Insights Dashboard" }

            (controls_view(options, selection))

            div id=(CHARTS_CONTAINER_ID)
            {
                (charts_content(model, charts))
            }
        }
    );

    base("Dashboard", &[echarts_script()], &content)
}

/// The part of the page that changes with the selection.
fn charts_content(model: &DashboardModel, charts: &[DashboardChart]) -> Markup {
    html!(
        p id="summary" class="summary"
        {
            "Showing " (format_count(model.transaction_count)) " transactions totalling "
            (format_currency(model.total_amount))
        }

        @if model.is_empty() {
            p id="no-data" class="empty-note"
            {
                "No transactions match the selected filters. Try selecting more years, \
                another merchant or another customer."
            }
        }

        (charts_view(charts))
    )
}
