//! The transaction ledger: the immutable table every dashboard view is computed from.
//!
//! The ledger is loaded once from CSV with [load_ledger] and never modified
//! afterwards. Each [Transaction] carries calendar fields derived from its
//! timestamp so the filters and aggregations never need to re-parse dates.

mod load;
mod transaction;

use std::collections::BTreeSet;

pub use load::{LoadError, load_ledger, load_ledger_from_reader};
pub use transaction::{CalendarFields, Transaction, YearMonth};

/// An ordered, read-only collection of transactions.
///
/// Rows keep the order they had in the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create a ledger from `transactions`, keeping their order.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// All transactions in source order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the ledger.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The distinct years found in the ledger, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.transactions
            .iter()
            .map(|transaction| transaction.calendar().year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The distinct merchant names found in the ledger, in ascending order.
    pub fn merchants(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .map(Transaction::merchant)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The distinct customer IDs found in the ledger, in ascending order.
    pub fn customer_ids(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .map(Transaction::customer_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
