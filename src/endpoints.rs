//! The endpoint URIs.

/// The dashboard page.
pub const ROOT: &str = "/";
/// The chart fragment requested by the dashboard controls.
pub const DASHBOARD_CHARTS: &str = "/dashboard/charts";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Append the raw query string `query` to `endpoint_path`.
///
/// An empty or missing query returns the path unchanged.
pub fn with_query(endpoint_path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{endpoint_path}?{query}"),
        _ => endpoint_path.to_owned(),
    }
}
