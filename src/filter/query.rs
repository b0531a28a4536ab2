//! Decodes the dashboard controls from URL query parameters.
//!
//! On the wire the year control uses the string [ALL_SENTINEL] to mean "no
//! restriction", and the merchant and customer controls use an empty value.
//! Both are converted to [Selector::All] here and do not appear anywhere else.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::Error;

use super::{Selection, Selector};

/// The option value the year control sends for "All Years".
///
/// Merchants and customers send an empty value instead, since any non-empty
/// string may be a real merchant or customer ID.
pub const ALL_SENTINEL: &str = "all";

/// The raw query parameters sent by the dashboard controls.
///
/// `years` may be repeated, e.g. `?years=2022&years=2023`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct SelectionQuery {
    /// Selected years, or the sentinel.
    #[serde(default)]
    pub years: Vec<String>,
    /// The selected merchant, or empty for all merchants.
    pub merchant: Option<String>,
    /// The selected customer ID, or empty for all customers.
    pub customer: Option<String>,
}

impl SelectionQuery {
    /// Convert the raw parameters into a [Selection].
    ///
    /// Missing parameters mean "all". Values that cannot be interpreted are
    /// logged and turned into a selection that matches no transactions, so a
    /// bad request shows empty charts instead of failing.
    pub fn into_selection(self) -> Selection {
        let years = parse_years(&self.years).unwrap_or_else(|error| {
            tracing::warn!("{error}, no transactions will match");
            Selector::Only(BTreeSet::new())
        });

        Selection {
            years,
            merchant: parse_text(self.merchant),
            customer_id: parse_text(self.customer),
        }
    }
}

/// Parse the selected years.
///
/// The sentinel anywhere in `values` selects every year, as does a list with
/// no non-empty values.
///
/// # Errors
/// Returns [Error::InvalidSelection] if a value is neither the sentinel nor a year.
fn parse_years(values: &[String]) -> Result<Selector<BTreeSet<i32>>, Error> {
    let values: Vec<&str> = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect();

    if values.is_empty() || values.contains(&ALL_SENTINEL) {
        return Ok(Selector::All);
    }

    values
        .iter()
        .map(|value| {
            value
                .parse::<i32>()
                .map_err(|_| Error::InvalidSelection {
                    field: "years",
                    value: value.to_string(),
                })
        })
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Selector::Only)
}

fn parse_text(value: Option<String>) -> Selector<String> {
    match value {
        None => Selector::All,
        Some(value) if value.is_empty() => Selector::All,
        Some(value) => Selector::Only(value),
    }
}
