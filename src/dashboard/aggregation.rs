//! Projections of the filtered transactions that feed the dashboard charts.
//!
//! Every function here takes the filtered rows and nothing else, so each
//! chart can be computed independently and an empty selection simply yields
//! empty output.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::ledger::{Transaction, YearMonth};

/// The number of equal-width bins in the amount histogram.
pub const HISTOGRAM_BIN_COUNT: usize = 30;

/// The number of transactions at one merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantCount {
    /// The merchant name.
    pub merchant: String,
    /// How many transactions were made at the merchant.
    pub count: usize,
}

/// The amount of a single transaction, labelled with its merchant.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantAmount {
    /// The merchant name.
    pub merchant: String,
    /// The transaction amount.
    pub amount: f64,
}

/// The number of transactions in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    /// The month.
    pub month: YearMonth,
    /// How many transactions happened in the month.
    pub count: usize,
}

/// Transaction amounts sorted into equal-width bins.
///
/// `edges` has one more entry than `counts`: bin `i` spans
/// `edges[i]..edges[i + 1]`, with the last bin also including its upper edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// The bin boundaries in ascending order.
    pub edges: Vec<f64>,
    /// The number of amounts in each bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Whether the histogram has no bins.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Counts the transactions at each merchant.
///
/// # Returns
/// One entry per merchant, ordered by count (highest first) and then by name.
pub fn merchant_distribution(transactions: &[&Transaction]) -> Vec<MerchantCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        *counts.entry(transaction.merchant()).or_insert(0) += 1;
    }

    let mut distribution: Vec<_> = counts
        .into_iter()
        .map(|(merchant, count)| MerchantCount {
            merchant: merchant.to_owned(),
            count,
        })
        .collect();

    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.merchant.cmp(&b.merchant)));
    distribution
}

/// Pairs each transaction's amount with its merchant, in row order.
///
/// Amounts are not summed. The bar chart draws one mark per
/// transaction.
pub fn amount_by_merchant(transactions: &[&Transaction]) -> Vec<MerchantAmount> {
    transactions
        .iter()
        .map(|transaction| MerchantAmount {
            merchant: transaction.merchant().to_owned(),
            amount: transaction.amount(),
        })
        .collect()
}

/// Counts the transactions in each calendar month.
///
/// # Returns
/// Months in chronological order. Months without transactions are left out.
pub fn monthly_trend(transactions: &[&Transaction]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<YearMonth, usize> = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.calendar().period).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Sorts transaction amounts into [HISTOGRAM_BIN_COUNT] equal-width bins.
///
/// The bins span exactly the smallest to the largest amount in
/// `transactions`, so they move with the selection.
///
/// # Returns
/// - An empty histogram if there are no transactions.
/// - A single bin holding every transaction if all amounts are equal.
pub fn amount_histogram(transactions: &[&Transaction]) -> Histogram {
    let amounts: Vec<f64> = transactions
        .iter()
        .map(|transaction| transaction.amount())
        .collect();

    let (Some(min), Some(max)) = (
        amounts.iter().copied().reduce(f64::min),
        amounts.iter().copied().reduce(f64::max),
    ) else {
        return Histogram::default();
    };

    if min == max {
        return Histogram {
            edges: vec![min, max],
            counts: vec![amounts.len()],
        };
    }

    // Work with halved values so `max - min` cannot overflow for extreme amounts.
    let half_min = min / 2.0;
    let half_width = (max / 2.0 - half_min) / HISTOGRAM_BIN_COUNT as f64;
    let mut edges: Vec<f64> = (0..=HISTOGRAM_BIN_COUNT)
        .map(|i| 2.0 * (half_min + half_width * i as f64))
        .collect();
    // Avoid rounding drift on the upper bound.
    edges[HISTOGRAM_BIN_COUNT] = max;

    let mut counts = vec![0; HISTOGRAM_BIN_COUNT];

    for amount in amounts {
        let bin = ((amount / 2.0 - half_min) / half_width) as usize;
        counts[bin.min(HISTOGRAM_BIN_COUNT - 1)] += 1;
    }

    Histogram { edges, counts }
}

/// Sums the amounts of `transactions`.
pub fn total_amount(transactions: &[&Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount())
        .sum()
}

/// Lays out per-transaction amounts as stacked bar series.
///
/// Merchants become the categories (sorted by name). Series `k` holds the
/// `k`-th transaction of every merchant, or `None` where a merchant has fewer
/// than `k + 1` transactions. Stacking the series draws each merchant's
/// transactions as separate segments of one column.
///
/// # Returns
/// Tuple of (merchant categories, series values).
pub fn stack_amounts_by_merchant(
    amounts: &[MerchantAmount],
) -> (Vec<String>, Vec<Vec<Option<f64>>>) {
    let merchants: Vec<String> = amounts
        .iter()
        .map(|entry| entry.merchant.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();

    let mut amounts_by_merchant: Vec<Vec<f64>> = vec![Vec::new(); merchants.len()];

    for entry in amounts {
        if let Ok(index) = merchants.binary_search(&entry.merchant) {
            amounts_by_merchant[index].push(entry.amount);
        }
    }

    let depth = amounts_by_merchant.iter().map(Vec::len).max().unwrap_or(0);
    let series = (0..depth)
        .map(|k| {
            amounts_by_merchant
                .iter()
                .map(|merchant_amounts| merchant_amounts.get(k).copied())
                .collect()
        })
        .collect();

    (merchants, series)
}
