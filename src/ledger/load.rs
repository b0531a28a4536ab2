//! Reads the ledger from a CSV file.
//!
//! The file must have a header row. Columns are located by name, so their
//! order does not matter and extra columns are ignored.

use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;
use time::{
    Date, PrimitiveDateTime, Time, format_description::BorrowedFormatItem,
    macros::format_description,
};

use super::{Ledger, Transaction};

/// Errors that prevent the ledger from being loaded.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("could not open ledger file \"{path}\": {reason}")]
    Open {
        /// The path that was given.
        path: String,
        /// The underlying IO error message.
        reason: String,
    },

    /// The data is not valid CSV, e.g. rows have differing numbers of fields.
    #[error("could not parse the ledger as CSV: {0}")]
    Csv(String),

    /// The header row does not name one of the required columns.
    #[error("the ledger is missing the required column \"{0}\"")]
    MissingColumn(&'static str),

    /// A row has a value that cannot be interpreted.
    #[error("invalid row on line {line}: {reason}")]
    MalformedRow {
        /// The 1-based line number in the CSV file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },
}

/// The columns the ledger needs and the header names accepted for each.
#[derive(Debug, Clone, Copy)]
enum Column {
    Id,
    CustomerId,
    Timestamp,
    Merchant,
    Amount,
}

impl Column {
    fn name(self) -> &'static str {
        match self {
            Column::Id => "Transaction ID",
            Column::CustomerId => "Customer ID",
            Column::Timestamp => "Transaction Date",
            Column::Merchant => "Merchant",
            Column::Amount => "Amount",
        }
    }

    /// Lower case header names that refer to this column.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Id => &["transaction id", "transaction_id", "id"],
            Column::CustomerId => &["customer id", "customer_id", "customer"],
            Column::Timestamp => &["transaction date", "transaction_date", "timestamp", "date"],
            Column::Merchant => &["merchant"],
            Column::Amount => &["amount"],
        }
    }

    fn find_in(self, headers: &StringRecord) -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|header| {
                let header = header.trim().to_lowercase();
                self.aliases().contains(&header.as_str())
            })
            .ok_or(LoadError::MissingColumn(self.name()))
    }
}

/// The position of each required column in a record.
struct ColumnIndices {
    id: usize,
    customer_id: usize,
    timestamp: usize,
    merchant: usize,
    amount: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        Ok(Self {
            id: Column::Id.find_in(headers)?,
            customer_id: Column::CustomerId.find_in(headers)?,
            timestamp: Column::Timestamp.find_in(headers)?,
            merchant: Column::Merchant.find_in(headers)?,
            amount: Column::Amount.find_in(headers)?,
        })
    }
}

const DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 4] = [
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second]"),
];

const DATE_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]/[month]/[day]"),
];

/// Load the ledger from the CSV file at `path`.
///
/// # Errors
/// Returns [LoadError::Open] if the file cannot be opened, otherwise any of
/// the errors from [load_ledger_from_reader].
pub fn load_ledger(path: &Path) -> Result<Ledger, LoadError> {
    let file = File::open(path).map_err(|error| LoadError::Open {
        path: path.display().to_string(),
        reason: error.to_string(),
    })?;

    let ledger = load_ledger_from_reader(file)?;
    tracing::info!(
        "Loaded {} transactions from \"{}\"",
        ledger.len(),
        path.display()
    );

    Ok(ledger)
}

/// Load the ledger from CSV data read from `reader`.
///
/// A header row with no data rows produces an empty ledger.
///
/// # Errors
/// - [LoadError::Csv] if the data is not valid CSV.
/// - [LoadError::MissingColumn] if the header lacks a required column.
/// - [LoadError::MalformedRow] if a row has an empty identifier or merchant,
///   a timestamp in an unknown format, or an amount that is not a finite number.
pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<Ledger, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|error| LoadError::Csv(error.to_string()))?;
    let columns = ColumnIndices::from_headers(headers)?;

    let mut transactions = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|error| LoadError::Csv(error.to_string()))?;
        transactions.push(parse_record(&record, &columns)?);
    }

    Ok(Ledger::new(transactions))
}

fn parse_record(record: &StringRecord, columns: &ColumnIndices) -> Result<Transaction, LoadError> {
    let line = record.position().map_or(0, |position| position.line());
    let malformed = |reason: String| LoadError::MalformedRow { line, reason };

    let id = required_field(record, columns.id, Column::Id, line)?;
    let customer_id = required_field(record, columns.customer_id, Column::CustomerId, line)?;
    let merchant = required_field(record, columns.merchant, Column::Merchant, line)?;

    let timestamp_text = required_field(record, columns.timestamp, Column::Timestamp, line)?;
    let timestamp = parse_timestamp(timestamp_text).ok_or_else(|| {
        malformed(format!(
            "could not parse '{timestamp_text}' as a date or date-time"
        ))
    })?;

    let amount_text = required_field(record, columns.amount, Column::Amount, line)?;
    let amount: f64 = amount_text
        .parse()
        .map_err(|error| malformed(format!("could not parse '{amount_text}' as amount: {error}")))?;

    if !amount.is_finite() {
        return Err(malformed(format!("the amount '{amount_text}' is not a finite number")));
    }

    Ok(Transaction::new(id, customer_id, timestamp, merchant, amount))
}

fn required_field(
    record: &StringRecord,
    index: usize,
    column: Column,
    line: u64,
) -> Result<&str, LoadError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::MalformedRow {
            line,
            reason: format!("the {} is empty", column.name()),
        }),
    }
}

/// Parse a timestamp in one of the accepted formats.
///
/// Dates without a time are taken to be at midnight.
fn parse_timestamp(text: &str) -> Option<PrimitiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| Date::parse(text, format).ok())
                .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        })
}
