//! Dashboard module
//!
//! Provides the page with the filter controls and the four transaction charts.
//! Changing a control re-renders only the charts.

mod aggregation;
mod charts;
mod controls;
mod handlers;
mod model;

pub use aggregation::{
    HISTOGRAM_BIN_COUNT, Histogram, MerchantAmount, MerchantCount, MonthlyCount,
};
pub use handlers::{get_dashboard_charts, get_dashboard_page};
pub use model::{DashboardModel, on_selection_changed};
