//! The data behind one rendering of the dashboard.

use crate::{
    dashboard::aggregation::{
        Histogram, MerchantAmount, MerchantCount, MonthlyCount, amount_by_merchant,
        amount_histogram, merchant_distribution, monthly_trend, total_amount,
    },
    filter::{Selection, filter_transactions},
    ledger::Ledger,
};

/// Everything the dashboard shows for a given selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardModel {
    /// How many transactions matched the selection.
    pub transaction_count: usize,
    /// The sum of the matching transaction amounts.
    pub total_amount: f64,
    /// Transaction counts per merchant, most frequent first.
    pub merchant_distribution: Vec<MerchantCount>,
    /// Every matching amount, grouped by merchant.
    pub amount_by_merchant: Vec<MerchantAmount>,
    /// Transaction counts per calendar month, oldest first.
    pub monthly_trend: Vec<MonthlyCount>,
    /// The distribution of matching amounts.
    pub histogram: Histogram,
}

impl DashboardModel {
    /// Whether no transactions matched the selection.
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

/// Filter `ledger` by `selection` and compute every chart's data.
///
/// This is the only thing that runs when a control changes. It does not
/// touch the ledger, so a selection always produces the same model.
pub fn on_selection_changed(ledger: &Ledger, selection: &Selection) -> DashboardModel {
    let rows = filter_transactions(ledger, selection);

    tracing::debug!(
        "Selection {selection:?} matched {} of {} transactions",
        rows.len(),
        ledger.len()
    );

    DashboardModel {
        transaction_count: rows.len(),
        total_amount: total_amount(&rows),
        merchant_distribution: merchant_distribution(&rows),
        amount_by_merchant: amount_by_merchant(&rows),
        monthly_trend: monthly_trend(&rows),
        histogram: amount_histogram(&rows),
    }
}
