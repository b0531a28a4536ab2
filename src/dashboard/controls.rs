//! The filter controls shown above the dashboard charts.
//!
//! The controls are a single form. Any change to a select sends the whole
//! form to [endpoints::DASHBOARD_CHARTS] and the response replaces the charts.

use maud::{Markup, html};

use crate::{
    endpoints,
    filter::{ALL_SENTINEL, Selection, Selector},
    ledger::Ledger,
};

/// The element the chart fragment is swapped into.
pub(super) const CHARTS_CONTAINER_ID: &str = "dashboard-charts";

/// The values offered by each control, taken from the whole ledger.
///
/// The options never change with the selection, so the user can always widen
/// a selection again.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct ControlOptions<'a> {
    pub years: Vec<i32>,
    pub merchants: Vec<&'a str>,
    pub customer_ids: Vec<&'a str>,
}

impl<'a> ControlOptions<'a> {
    pub fn from_ledger(ledger: &'a Ledger) -> Self {
        Self {
            years: ledger.years(),
            merchants: ledger.merchants(),
            customer_ids: ledger.customer_ids(),
        }
    }
}

/// Render the year, merchant and customer selects with `selection` marked.
pub(super) fn controls_view(options: &ControlOptions, selection: &Selection) -> Markup {
    let years: Vec<(String, bool)> = options
        .years
        .iter()
        .map(|&year| {
            let is_selected =
                matches!(&selection.years, Selector::Only(years) if years.contains(&year));
            (year.to_string(), is_selected)
        })
        .collect();

    html!(
        form
            id="dashboard-controls"
            class="controls"
            hx-get=(endpoints::DASHBOARD_CHARTS)
            hx-trigger="change"
            hx-target=(format!("#{CHARTS_CONTAINER_ID}"))
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
        {
            div class="control"
            {
                label for="year-select" { "Year" }

                select
                    id="year-select"
                    name="years"
                    multiple
                {
                    option value=(ALL_SENTINEL) selected[selection.years.is_all()] { "All Years" }

                    @for (year, is_selected) in &years {
                        option value=(year) selected[*is_selected] { (year) }
                    }
                }
            }

            (single_select(
                "merchant-select",
                "merchant",
                "Merchant",
                "All Merchants",
                &options.merchants,
                &selection.merchant,
            ))

            (single_select(
                "customer-select",
                "customer",
                "Customer",
                "All Customers",
                &options.customer_ids,
                &selection.customer_id,
            ))
        }
    )
}

fn single_select(
    id: &str,
    name: &str,
    label: &str,
    all_label: &str,
    values: &[&str],
    selector: &Selector<String>,
) -> Markup {
    html!(
        div class="control"
        {
            label for=(id) { (label) }

            select id=(id) name=(name)
            {
                option value="" selected[selector.is_all()] { (all_label) }

                @for value in values {
                    option
                        value=(value)
                        selected[matches!(selector, Selector::Only(selected) if selected == value)]
                    {
                        (value)
                    }
                }
            }
        }
    )
}
