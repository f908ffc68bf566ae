mod card_pdf;
mod csv_import;
mod date;
mod detect;
mod error;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{StatementFormat, Transaction};

use card_pdf::{parse_card_pdf, parse_ocr_card_pdf};
use csv_import::parse_checking_csv_file;
use detect::discover_statements;
pub(crate) use error::{ImportError, ImportResult};

/// What to do when one statement fails to parse. Either way a file
/// contributes all of its transactions or none of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ErrorPolicy {
    #[default]
    FailFast,
    SkipFile,
}

/// The parsed contents of one statement file.
#[derive(Debug, Clone)]
pub(crate) struct StatementBatch {
    pub(crate) path: PathBuf,
    pub(crate) format: StatementFormat,
    pub(crate) transactions: Vec<Transaction>,
}

#[derive(Debug)]
pub(crate) struct SkippedStatement {
    pub(crate) path: PathBuf,
    pub(crate) error: ImportError,
}

#[derive(Debug, Default)]
pub(crate) struct ImportReport {
    pub(crate) batches: Vec<StatementBatch>,
    pub(crate) skipped: Vec<SkippedStatement>,
}

impl ImportReport {
    /// Statements that parsed cleanly but held no rows. This usually means
    /// the file was routed to the wrong parser.
    pub(crate) fn empty_statements(&self) -> impl Iterator<Item = &StatementBatch> {
        self.batches.iter().filter(|b| b.transactions.is_empty())
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.batches.iter().map(|b| b.transactions.len()).sum()
    }
}

/// Run the parser for `format` over one file.
pub(crate) fn parse_statement(
    path: &Path,
    format: StatementFormat,
    year: i32,
) -> ImportResult<Vec<Transaction>> {
    match format {
        StatementFormat::CheckingCsv => parse_checking_csv_file(path),
        StatementFormat::CardPdf => parse_card_pdf(path, year),
        StatementFormat::OcrCardPdf => parse_ocr_card_pdf(path, year),
    }
}

/// Parse every recognised statement in `dir`, one file at a time.
pub(crate) fn import_directory(
    dir: &Path,
    year: i32,
    policy: ErrorPolicy,
) -> ImportResult<ImportReport> {
    let statements = discover_statements(dir).map_err(|e| ImportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    import_statements(&statements, year, policy)
}

pub(crate) fn import_statements(
    statements: &[(PathBuf, StatementFormat)],
    year: i32,
    policy: ErrorPolicy,
) -> ImportResult<ImportReport> {
    let mut report = ImportReport::default();

    for (path, format) in statements {
        match parse_statement(path, *format, year) {
            Ok(transactions) => {
                if transactions.is_empty() {
                    log::warn!(
                        "{}: no transactions found by the {format} parser",
                        path.display()
                    );
                } else {
                    log::debug!(
                        "{}: {} transactions ({format})",
                        path.display(),
                        transactions.len()
                    );
                }
                report.batches.push(StatementBatch {
                    path: path.clone(),
                    format: *format,
                    transactions,
                });
            }
            Err(error) => match policy {
                ErrorPolicy::FailFast => return Err(error),
                ErrorPolicy::SkipFile => {
                    log::warn!("skipping {}: {error}", path.display());
                    report.skipped.push(SkippedStatement {
                        path: path.clone(),
                        error,
                    });
                }
            },
        }
    }

    Ok(report)
}

/// File name used to label records in error messages.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
