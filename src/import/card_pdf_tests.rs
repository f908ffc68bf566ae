#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim().to_string()).collect()
}

fn ymd(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, m, d).unwrap()
}

// ── CARD_ROW ──────────────────────────────────────────────────

#[test]
fn test_row_patterns_compile() {
    assert!(Regex::new(CARD_ROW).is_ok());
    assert!(Regex::new(OCR_CARD_ROW).is_ok());
}

#[test]
fn test_card_row_matches_transaction_lines() {
    assert!(is_card_row("JAN6 JAN7 UBER $23.50"));
    assert!(is_card_row("DEC25 DEC27 AMAZON.CA $1,204.11"));
}

#[test]
fn test_card_row_rejects_furniture() {
    assert!(!is_card_row("STATEMENT DATE: JAN 31, 2022"));
    assert!(!is_card_row("Jan6 JAN7 UBER $23.50"));
    assert!(!is_card_row("JAN 6 JAN7 UBER"));
    assert!(!is_card_row("TOTAL NEW BALANCE $1,204.11"));
    assert!(!is_card_row(""));
}

#[test]
fn test_card_row_requires_two_chars_before_comma() {
    assert!(!is_card_row("JAN6,X"));
    assert!(!is_card_row("JAN6 ,"));
    assert!(!is_card_row("JAN6"));
}

#[test]
fn test_card_row_anchored_at_start() {
    assert!(!is_card_row("x JAN6 JAN7 UBER $23.50"));
}

// ── OCR_CARD_ROW ──────────────────────────────────────────────

#[test]
fn test_ocr_card_row_matches_transaction_lines() {
    assert!(is_ocr_card_row("Dec 25 Dec 27 UBER EATS $23.50"));
    assert!(is_ocr_card_row("Jan 6 Jan 7 NOFRILLS $45.10"));
}

#[test]
fn test_ocr_card_row_rejects_other_casing() {
    assert!(!is_ocr_card_row("DEC 25 DEC 27 UBER $23.50"));
    assert!(!is_ocr_card_row("Dec25 Dec 27 UBER $23.50"));
    assert!(!is_ocr_card_row("dec 25 dec 27 UBER $23.50"));
}

#[test]
fn test_ocr_card_row_rejects_furniture() {
    assert!(!is_ocr_card_row("Statement period"));
    assert!(!is_ocr_card_row("Dec 2, 2022"));
    assert!(!is_ocr_card_row("Dec 2"));
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("23.50"), Some(dec!(23.50)));
}

#[test]
fn test_parse_amount_currency_and_commas() {
    assert_eq!(parse_amount("$1,234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_amount("-$99.99"), Some(dec!(-99.99)));
    assert_eq!(parse_amount("-12.00"), Some(dec!(-12.00)));
}

#[test]
fn test_parse_amount_invalid() {
    assert_eq!(parse_amount("UBER"), None);
    assert_eq!(parse_amount("$"), None);
    assert_eq!(parse_amount("$-5"), None);
    assert_eq!(parse_amount("1,2OO.00"), None);
}

// ── parse_card_lines ──────────────────────────────────────────

#[test]
fn test_card_lines_basic() {
    let text = "
        TD CASH BACK VISA
        STATEMENT DATE: JAN 31, 2022
        JAN6    JAN7    UBER          $23.50
        JAN12   JAN13   NOFRILLS      $1,045.10
        TOTAL NEW BALANCE             $1,068.60
    ";
    let txns = parse_card_lines(&lines(text), 2022, "card.pdf").unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0], Transaction::new(ymd(1, 6), "UBER", dec!(23.50)));
    assert_eq!(txns[1].date, ymd(1, 12));
    assert_eq!(txns[1].amount, dec!(1045.10));
}

#[test]
fn test_card_lines_keep_multi_word_descriptions() {
    let text = "FEB3 FEB4 UBER   EATS  TORONTO $18.25";
    let txns = parse_card_lines(&lines(text), 2022, "card.pdf").unwrap();
    assert_eq!(txns[0].description, "UBER EATS TORONTO");
    assert_eq!(txns[0].amount, dec!(18.25));
}

#[test]
fn test_card_lines_credit_kept_negative() {
    let text = "MAR1 MAR2 PAYMENT -$500.00";
    let txns = parse_card_lines(&lines(text), 2022, "card.pdf").unwrap();
    assert_eq!(txns[0].amount, dec!(-500.00));
}

#[test]
fn test_card_lines_count_matches_selected_lines() {
    let input = lines(
        "JAN6 JAN7 A $1.00\nheader\nJAN8 JAN9 B $2.00\nFEB1 FEB2 C $3.00\nfooter 1 of 2",
    );
    let selected = input.iter().filter(|l| is_card_row(l)).count();
    let txns = parse_card_lines(&input, 2022, "card.pdf").unwrap();
    assert_eq!(txns.len(), selected);
    assert_eq!(txns.len(), 3);
}

#[test]
fn test_card_lines_no_rows_is_empty() {
    let txns = parse_card_lines(&lines("nothing here\nat all"), 2022, "card.pdf").unwrap();
    assert!(txns.is_empty());
}

#[test]
fn test_card_lines_too_few_tokens() {
    let err = parse_card_lines(&lines("JAN6XX UBER $1.00"), 2022, "card.pdf").unwrap_err();
    assert!(matches!(err, ImportError::MalformedRecord { .. }));
    assert!(err.to_string().contains("card.pdf:1"));
}

#[test]
fn test_card_lines_bad_amount() {
    let err = parse_card_lines(&lines("JAN6 JAN7 UBER EATS"), 2022, "card.pdf").unwrap_err();
    assert!(matches!(err, ImportError::MalformedRecord { .. }));
}

#[test]
fn test_card_lines_bad_date() {
    let err =
        parse_card_lines(&lines("\nFOO6 JAN7 UBER $1.00"), 2022, "card.pdf").unwrap_err();
    assert!(matches!(err, ImportError::InvalidDateToken { .. }));
    assert!(err.to_string().contains("card.pdf:2"));
}

// ── parse_ocr_card_lines ──────────────────────────────────────

#[test]
fn test_ocr_lines_basic() {
    let text = "
        Transactions
        Dec 25 Dec 27 UBER EATS $23.50
        Nov 3 Nov 4 NOFRILLS 1234 $45.10
    ";
    let txns = parse_ocr_card_lines(&lines(text), 2022, "6123.pdf").unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(
        txns[0],
        Transaction::new(ymd(12, 25), "UBER EATS", dec!(-23.50))
    );
    assert_eq!(txns[1].date, ymd(11, 3));
    assert_eq!(txns[1].description, "NOFRILLS 1234");
}

#[test]
fn test_ocr_lines_fix_letter_o_in_amount() {
    let text = "Dec 2 Dec 3 E-TRANSFER RECEIVED $1,2OO.00";
    let txns = parse_ocr_card_lines(&lines(text), 2022, "6123.pdf").unwrap();
    assert_eq!(txns[0].amount, dec!(-1200.00));
}

#[test]
fn test_ocr_lines_count_matches_selected_lines() {
    let input = lines("Jan 6 Jan 7 A $1.00\nJAN6 JAN7 B $2.00\nFeb 1 Feb 2 C $3.00");
    let selected = input.iter().filter(|l| is_ocr_card_row(l)).count();
    let txns = parse_ocr_card_lines(&input, 2022, "6123.pdf").unwrap();
    assert_eq!(txns.len(), selected);
    assert_eq!(txns.len(), 2);
}

#[test]
fn test_ocr_lines_amount_still_not_numeric() {
    let err =
        parse_ocr_card_lines(&lines("Dec 2 Dec 3 COFFEE $1Z.00"), 2022, "6123.pdf").unwrap_err();
    assert!(matches!(err, ImportError::MalformedRecord { .. }));
}

#[test]
fn test_ocr_lines_too_few_tokens() {
    let err = parse_ocr_card_lines(&lines("Dec 2 Dec 3"), 2022, "6123.pdf").unwrap_err();
    assert!(matches!(err, ImportError::MalformedRecord { .. }));
}

#[test]
fn test_ocr_lines_bad_day() {
    let err =
        parse_ocr_card_lines(&lines("Feb 30 Mar 1 RENT $900.00"), 2022, "6123.pdf").unwrap_err();
    assert!(matches!(err, ImportError::InvalidDateToken { .. }));
}
