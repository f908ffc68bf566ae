use regex::Regex;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use super::date::parse_compact_date;
use super::error::{ImportError, ImportResult, Location};
use crate::models::Transaction;

/// A card transaction row starts with an upper-case compact date (`JAN6`)
/// followed by two more characters before any comma.
pub(crate) const CARD_ROW: &str = r"^[A-Z]{3}[0-9][^,]{2}";

/// Rows in OCR'd statements start with a title-case month, a space and the
/// day (`Dec 25`).
pub(crate) const OCR_CARD_ROW: &str = r"^[A-Z][a-z]{2} [0-9][^,]{2}";

const CARD_MIN_TOKENS: usize = 4;
const OCR_CARD_MIN_TOKENS: usize = 5;

fn card_row() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CARD_ROW).ok()).as_ref()
}

fn ocr_card_row() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(OCR_CARD_ROW).ok()).as_ref()
}

pub(crate) fn is_card_row(line: &str) -> bool {
    card_row().is_some_and(|re| re.is_match(line))
}

pub(crate) fn is_ocr_card_row(line: &str) -> bool {
    ocr_card_row().is_some_and(|re| re.is_match(line))
}

/// Extract the text of every page and return it as trimmed lines.
pub(crate) fn extract_lines(path: &Path) -> ImportResult<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ImportError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(text.lines().map(|l| l.trim().to_string()).collect())
}

/// Parse the lines of a card statement.
///
/// Layout per row: `DATE REF DESCRIPTION... AMOUNT`. Amounts are already
/// outflow-positive.
pub(crate) fn parse_card_lines(
    lines: &[String],
    year: i32,
    source: &str,
) -> ImportResult<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if !is_card_row(line) {
            continue;
        }
        let location = Location::new(source, i + 1);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < CARD_MIN_TOKENS {
            return Err(ImportError::malformed(
                location,
                format!("expected at least {CARD_MIN_TOKENS} fields, found {}", tokens.len()),
                line,
            ));
        }

        let date = compact_date(tokens[0], year, &location)?;
        let description = tokens[2..tokens.len() - 1].join(" ");
        let amount = parse_amount(tokens[tokens.len() - 1])
            .ok_or_else(|| ImportError::malformed(location, "amount is not a number", line))?;

        transactions.push(Transaction::new(date, description, amount));
    }
    Ok(transactions)
}

/// Parse the lines of an OCR'd card statement.
///
/// Layout per row: `Mon DD Mon DD DESCRIPTION... AMOUNT`. The source prints
/// charges as credits, so amounts are negated. OCR tends to read zeros as
/// the letter `O`; those are put back before parsing.
pub(crate) fn parse_ocr_card_lines(
    lines: &[String],
    year: i32,
    source: &str,
) -> ImportResult<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if !is_ocr_card_row(line) {
            continue;
        }
        let location = Location::new(source, i + 1);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < OCR_CARD_MIN_TOKENS {
            return Err(ImportError::malformed(
                location,
                format!(
                    "expected at least {OCR_CARD_MIN_TOKENS} fields, found {}",
                    tokens.len()
                ),
                line,
            ));
        }

        let token = format!("{}{}", tokens[0].to_uppercase(), tokens[1]);
        let date = compact_date(&token, year, &location)?;
        let description = tokens[4..tokens.len() - 1].join(" ");
        let amount = parse_amount(&tokens[tokens.len() - 1].replace('O', "0"))
            .ok_or_else(|| ImportError::malformed(location, "amount is not a number", line))?;

        transactions.push(Transaction::new(date, description, -amount));
    }
    Ok(transactions)
}

pub(crate) fn parse_card_pdf(path: &Path, year: i32) -> ImportResult<Vec<Transaction>> {
    let lines = extract_lines(path)?;
    parse_card_lines(&lines, year, &super::source_name(path))
}

/// The file must already have been through an OCR round trip; statements
/// with the original broken text encoding yield no rows.
pub(crate) fn parse_ocr_card_pdf(path: &Path, year: i32) -> ImportResult<Vec<Transaction>> {
    let lines = extract_lines(path)?;
    parse_ocr_card_lines(&lines, year, &super::source_name(path))
}

fn compact_date(
    token: &str,
    year: i32,
    location: &Location,
) -> ImportResult<chrono::NaiveDate> {
    parse_compact_date(token, year).ok_or_else(|| ImportError::InvalidDateToken {
        location: location.clone(),
        token: token.to_string(),
    })
}

/// Strip thousands separators and one leading `$` (after any minus sign).
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(',', "");
    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let digits = rest.strip_prefix('$').unwrap_or(rest);
    if digits.starts_with(['-', '+']) {
        return None;
    }
    let value = Decimal::from_str(digits).ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[path = "card_pdf_tests.rs"]
mod tests;
