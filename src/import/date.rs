use chrono::{Datelike, NaiveDate};

const MONTHS: [(&str, u32); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Formats tried, in order, for free-form dates in CSV exports. `%Y`
/// also accepts two digits, so those matches are only kept when the year
/// came out with four; the `%y` forms pick up the rest.
const CALENDAR_FORMATS: [&str; 8] = [
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%m-%d-%y",
];

/// Convert a compact `MMMDD` token (`JAN6`, `Dec 25`) into a date in `year`.
///
/// Returns `None` for an unknown month, a day that is not one or two digits,
/// or a day the month does not have.
pub(crate) fn parse_compact_date(token: &str, year: i32) -> Option<NaiveDate> {
    let token = token.trim();
    let month = month_number(token.get(..3)?)?;
    let day = token.get(3..)?.trim_start();

    if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day.parse().ok()?)
}

fn month_number(abbrev: &str) -> Option<u32> {
    let upper = abbrev.to_ascii_uppercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, number)| *number)
}

/// Parse a full calendar date as written in account history exports.
pub(crate) fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    CALENDAR_FORMATS
        .iter()
        .find_map(|fmt| {
            let date = NaiveDate::parse_from_str(s, fmt).ok()?;
            (!fmt.contains("%Y") || date.year() >= 1000).then_some(date)
        })
}

#[cfg(test)]
#[path = "date_tests.rs"]
mod tests;
