//! CSV export of report transactions.

use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, analytics::MISSING_CATEGORY_LABEL, transaction::TransactionWithCategory};

/// The header row of an exported report.
pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Write `transactions` as CSV, one row per transaction after [CSV_HEADER].
///
/// Fields containing commas or quotes are quoted by the CSV writer.
///
/// # Errors
///
/// Returns [Error::CsvError] if a row could not be written.
pub fn write_csv(transactions: &[TransactionWithCategory]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for item in transactions {
        let transaction = &item.transaction;
        let date = transaction
            .date
            .format(DATE_FORMAT)
            .map_err(|error| Error::CsvError(error.to_string()))?;

        writer
            .write_record([
                date.as_str(),
                transaction.description.as_str(),
                item.category_name_or(MISSING_CATEGORY_LABEL),
                transaction.transaction_type.as_str(),
                transaction.amount.to_string().as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

fn csv_error(error: csv::Error) -> Error {
    Error::CsvError(error.to_string())
}
