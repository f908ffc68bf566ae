use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::date::parse_calendar_date;
use super::error::{ImportError, ImportResult, Location};
use crate::models::Transaction;

/// Column layout of a chequing account history export. There is no header
/// row; the running balance is read past and dropped.
const DATE_COLUMN: usize = 0;
const DESCRIPTION_COLUMN: usize = 1;
const WITHDRAWAL_COLUMN: usize = 2;
const DEPOSIT_COLUMN: usize = 3;
const COLUMN_COUNT: usize = 5;

/// Parse a chequing history export from any reader.
///
/// `source` names the input in error messages.
pub(crate) fn parse_checking_csv<R: Read>(reader: R, source: &str) -> ImportResult<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| ImportError::Csv {
            source_name: source.to_string(),
            source: e,
        })?;
        let row: Vec<&str> = record.iter().collect();
        let location = Location::new(source, row_number(&record, i));
        transactions.push(parse_row(&row, location)?);
    }

    Ok(transactions)
}

/// Parse a chequing history export from disk.
pub(crate) fn parse_checking_csv_file(path: &Path) -> ImportResult<Vec<Transaction>> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_checking_csv(file, &super::source_name(path))
}

fn row_number(record: &csv::StringRecord, index: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(index + 1)
}

fn parse_row(row: &[&str], location: Location) -> ImportResult<Transaction> {
    if row.len() != COLUMN_COUNT {
        return Err(ImportError::malformed(
            location,
            format!("expected {COLUMN_COUNT} columns, found {}", row.len()),
            &row.join(","),
        ));
    }

    let date_str = row[DATE_COLUMN].trim();
    let date = parse_calendar_date(date_str).ok_or_else(|| ImportError::InvalidDateToken {
        location: location.clone(),
        token: date_str.to_string(),
    })?;

    let withdrawal = parse_cell(row[WITHDRAWAL_COLUMN]).ok_or_else(|| {
        ImportError::malformed(location.clone(), "withdrawal is not a number", &row.join(","))
    })?;
    let deposit = parse_cell(row[DEPOSIT_COLUMN]).ok_or_else(|| {
        ImportError::malformed(location.clone(), "deposit is not a number", &row.join(","))
    })?;

    Ok(Transaction::new(
        date,
        row[DESCRIPTION_COLUMN].trim(),
        withdrawal - deposit,
    ))
}

/// An empty cell counts as zero.
fn parse_cell(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(cleaned).ok()
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
