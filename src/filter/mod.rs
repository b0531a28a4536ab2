//! Narrows the ledger down to the transactions matching the dashboard controls.
//!
//! A [Selection] holds one [Selector] per dimension (year, merchant and
//! customer). The dimensions are independent and combine with logical AND,
//! so the order they are applied in never changes the result.

mod query;
mod selector;

use std::collections::BTreeSet;

pub use query::{ALL_SENTINEL, SelectionQuery};
pub use selector::Selector;

use crate::ledger::{Ledger, Transaction};

/// The state of the three dashboard filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// The years to keep.
    pub years: Selector<BTreeSet<i32>>,
    /// The merchant to keep.
    pub merchant: Selector<String>,
    /// The customer to keep.
    pub customer_id: Selector<String>,
}

impl Selection {
    /// A selection that keeps every transaction.
    pub fn all() -> Self {
        Self::default()
    }

    /// The individual criteria of the selection, one per dimension.
    pub fn criteria(&self) -> [Criterion<'_>; 3] {
        [
            Criterion::Years(&self.years),
            Criterion::Merchant(&self.merchant),
            Criterion::CustomerId(&self.customer_id),
        ]
    }
}

/// A single filter dimension of a [Selection].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<'a> {
    /// Keep transactions whose year is selected.
    Years(&'a Selector<BTreeSet<i32>>),
    /// Keep transactions with the selected merchant.
    Merchant(&'a Selector<String>),
    /// Keep transactions made by the selected customer.
    CustomerId(&'a Selector<String>),
}

impl Criterion<'_> {
    /// Whether `transaction` passes this criterion.
    pub fn admits(&self, transaction: &Transaction) -> bool {
        match self {
            Criterion::Years(selector) => selector.admits_year(transaction.calendar().year),
            Criterion::Merchant(selector) => selector.admits(transaction.merchant()),
            Criterion::CustomerId(selector) => selector.admits(transaction.customer_id()),
        }
    }

    /// Keep only the rows that pass this criterion, preserving their order.
    pub fn retain<'t>(&self, mut rows: Vec<&'t Transaction>) -> Vec<&'t Transaction> {
        rows.retain(|transaction| self.admits(transaction));
        rows
    }
}

/// Get the transactions in `ledger` that match every criterion in `selection`.
///
/// Rows keep their ledger order. No matches is a valid, empty result.
pub fn filter_transactions<'a>(ledger: &'a Ledger, selection: &Selection) -> Vec<&'a Transaction> {
    apply_criteria(ledger.transactions().iter().collect(), &selection.criteria())
}

/// Apply `criteria` to `rows` one after another.
pub fn apply_criteria<'t>(
    rows: Vec<&'t Transaction>,
    criteria: &[Criterion<'_>],
) -> Vec<&'t Transaction> {
    criteria
        .iter()
        .fold(rows, |rows, criterion| criterion.retain(rows))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use crate::{
        ledger::{Ledger, Transaction},
        test_utils::ledger::{scenario_ledger, varied_ledger},
    };

    use super::{Selection, Selector, apply_criteria, filter_transactions};

    fn ids<'a>(rows: &[&'a Transaction]) -> Vec<&'a str> {
        rows.iter().map(|transaction| transaction.id()).collect()
    }

    fn selection(years: &[i32], merchant: Option<&str>, customer_id: Option<&str>) -> Selection {
        Selection {
            years: if years.is_empty() {
                Selector::All
            } else {
                Selector::Only(years.iter().copied().collect())
            },
            merchant: merchant.map_or(Selector::All, |m| Selector::Only(m.to_owned())),
            customer_id: customer_id.map_or(Selector::All, |c| Selector::Only(c.to_owned())),
        }
    }

    #[test]
    fn all_selection_returns_whole_ledger() {
        let ledger = varied_ledger();

        let rows = filter_transactions(&ledger, &Selection::all());

        let all: Vec<_> = ledger.transactions().iter().collect();
        assert_eq!(rows, all);
    }

    #[test]
    fn filters_by_merchant() {
        let ledger = scenario_ledger();

        let rows = filter_transactions(&ledger, &selection(&[], Some("M1"), None));

        assert_eq!(ids(&rows), vec!["1", "3"]);
        let total: f64 = rows.iter().map(|transaction| transaction.amount()).sum();
        assert_eq!(total, 175.0);
    }

    #[test]
    fn filters_by_year_set() {
        let ledger = varied_ledger();

        let rows = filter_transactions(&ledger, &selection(&[2022, 2024], None, None));

        assert!(!rows.is_empty());
        assert!(
            rows.iter()
                .all(|t| [2022, 2024].contains(&t.calendar().year))
        );
        assert_eq!(
            rows.len(),
            ledger
                .transactions()
                .iter()
                .filter(|t| t.calendar().year != 2023)
                .count()
        );
    }

    #[test]
    fn filters_by_customer() {
        let ledger = varied_ledger();

        let rows = filter_transactions(&ledger, &selection(&[], None, Some("C2")));

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|t| t.customer_id() == "C2"));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ledger = varied_ledger();

        let rows = filter_transactions(
            &ledger,
            &selection(&[2023], Some("Woolworths"), Some("C1")),
        );

        assert!(rows.iter().all(|t| {
            t.calendar().year == 2023 && t.merchant() == "Woolworths" && t.customer_id() == "C1"
        }));
        let expected = ledger
            .transactions()
            .iter()
            .filter(|t| {
                t.calendar().year == 2023 && t.merchant() == "Woolworths" && t.customer_id() == "C1"
            })
            .count();
        assert_eq!(rows.len(), expected);
    }

    #[test]
    fn unknown_customer_gives_empty_result() {
        let ledger = scenario_ledger();

        let rows = filter_transactions(&ledger, &selection(&[], None, Some("nobody")));

        assert!(rows.is_empty());
    }

    #[test]
    fn empty_ledger_gives_empty_result() {
        let ledger = Ledger::default();

        let rows = filter_transactions(&ledger, &selection(&[2023], Some("M1"), None));

        assert!(rows.is_empty());
    }

    #[rstest]
    #[case([0, 1, 2])]
    #[case([0, 2, 1])]
    #[case([1, 0, 2])]
    #[case([1, 2, 0])]
    #[case([2, 0, 1])]
    #[case([2, 1, 0])]
    fn application_order_does_not_change_result(#[case] order: [usize; 3]) {
        let ledger = varied_ledger();
        let selections = [
            selection(&[2023, 2024], Some("Woolworths"), Some("C1")),
            selection(&[2024], None, Some("C2")),
            selection(&[], Some("Checkers"), None),
            selection(&[2022], Some("Takealot"), Some("C3")),
        ];

        for selection in &selections {
            let criteria = selection.criteria();
            let reordered = order.map(|index| criteria[index]);
            let rows: Vec<_> = ledger.transactions().iter().collect();

            let expected = filter_transactions(&ledger, selection);
            let actual = apply_criteria(rows, &reordered);

            assert_eq!(ids(&actual), ids(&expected), "order {order:?} for {selection:?}");
        }
    }

    #[test]
    fn empty_year_set_matches_nothing() {
        let ledger = varied_ledger();
        let selection = Selection {
            years: Selector::Only(BTreeSet::new()),
            ..Selection::all()
        };

        assert!(filter_transactions(&ledger, &selection).is_empty());
    }
}
