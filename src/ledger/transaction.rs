//! The transaction record and the calendar fields derived from its timestamp.

use std::fmt::{self, Display};

use time::{Month, PrimitiveDateTime, Time, Weekday};

/// A calendar month, used as the bucket for the monthly trend.
///
/// Orders chronologically and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Create the bucket for `month` of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month: month.into(),
        }
    }

    /// The calendar year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The month number, 1 to 12.
    pub fn month(self) -> u8 {
        self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Calendar attributes of a transaction's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// The calendar year, e.g. 2023.
    pub year: i32,
    /// The month number, 1 to 12.
    pub month: u8,
    /// The day of the month, 1 to 31.
    pub day: u8,
    /// The time of day.
    pub time: Time,
    /// The day of the week.
    pub weekday: Weekday,
    /// Whether the transaction happened on a Saturday or Sunday.
    pub is_weekend: bool,
    /// The year-month bucket the transaction falls into.
    pub period: YearMonth,
}

impl CalendarFields {
    /// Derive the calendar fields of `timestamp`.
    pub fn from_timestamp(timestamp: PrimitiveDateTime) -> Self {
        let weekday = timestamp.weekday();

        Self {
            year: timestamp.year(),
            month: timestamp.month().into(),
            day: timestamp.day(),
            time: timestamp.time(),
            weekday,
            is_weekend: matches!(weekday, Weekday::Saturday | Weekday::Sunday),
            period: YearMonth::new(timestamp.year(), timestamp.month()),
        }
    }

    /// The English name of the day of the week, e.g. "Monday".
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// A single row of the ledger.
///
/// The calendar fields are computed once on construction and, like the rest
/// of the record, cannot change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: String,
    customer_id: String,
    timestamp: PrimitiveDateTime,
    merchant: String,
    amount: f64,
    calendar: CalendarFields,
}

impl Transaction {
    /// Create a transaction and derive its calendar fields from `timestamp`.
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        timestamp: PrimitiveDateTime,
        merchant: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            timestamp,
            merchant: merchant.into(),
            amount,
            calendar: CalendarFields::from_timestamp(timestamp),
        }
    }

    /// The transaction identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The identifier of the customer that made the transaction.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// When the transaction happened.
    pub fn timestamp(&self) -> PrimitiveDateTime {
        self.timestamp
    }

    /// The name of the merchant.
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// The transaction amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The calendar fields derived from [Transaction::timestamp].
    pub fn calendar(&self) -> &CalendarFields {
        &self.calendar
    }
}
