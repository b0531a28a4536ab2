//! Ledgers shared by the tests.

use time::macros::datetime;

use crate::ledger::{Ledger, Transaction};

/// Three transactions: (M1, 2023-01, 100), (M2, 2023-01, 50), (M1, 2023-02, 75).
pub(crate) fn scenario_ledger() -> Ledger {
    Ledger::new(vec![
        Transaction::new("1", "C1", datetime!(2023-01-10 09:30), "M1", 100.0),
        Transaction::new("2", "C2", datetime!(2023-01-21 14:00), "M2", 50.0),
        Transaction::new("3", "C1", datetime!(2023-02-03 18:15), "M1", 75.0),
    ])
}

/// Transactions over three years, several merchants and customers.
pub(crate) fn varied_ledger() -> Ledger {
    Ledger::new(vec![
        Transaction::new("1", "C1", datetime!(2022-11-02 08:00), "Woolworths", 250.0),
        Transaction::new("2", "C2", datetime!(2022-12-24 10:00), "Takealot", 1200.0),
        Transaction::new("3", "C3", datetime!(2022-12-28 12:00), "Takealot", 89.99),
        Transaction::new("4", "C1", datetime!(2023-01-07 09:15), "Woolworths", 310.5),
        Transaction::new("5", "C1", datetime!(2023-01-19 17:45), "Checkers", 45.0),
        Transaction::new("6", "C2", datetime!(2023-03-02 13:30), "Woolworths", 99.0),
        Transaction::new("7", "C3", datetime!(2023-03-11 19:00), "Uber Eats", 180.25),
        Transaction::new("8", "C1", datetime!(2023-08-30 07:10), "Woolworths", 420.0),
        Transaction::new("9", "C2", datetime!(2024-01-05 11:00), "Checkers", 60.0),
        Transaction::new("10", "C2", datetime!(2024-01-06 11:30), "Woolworths", 75.0),
        Transaction::new("11", "C3", datetime!(2024-02-14 20:00), "Uber Eats", 230.0),
        Transaction::new("12", "C1", datetime!(2024-05-01 06:45), "Takealot", 15.0),
    ])
}
