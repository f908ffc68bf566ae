use std::path::{Path, PathBuf};

use crate::models::StatementFormat;

/// Pick a parser from the file name alone.
///
/// OCR'd card statements are saved under their numeric statement id
/// (`6123...pdf`), so a PDF with a leading digit goes to that parser and
/// every other PDF to the regular card parser.
pub(crate) fn detect_statement_format(path: &Path) -> Option<StatementFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let name = path.file_name()?.to_str()?;

    match extension.as_str() {
        "csv" => Some(StatementFormat::CheckingCsv),
        "pdf" if name.starts_with(|c: char| c.is_ascii_digit()) => {
            Some(StatementFormat::OcrCardPdf)
        }
        "pdf" => Some(StatementFormat::CardPdf),
        _ => None,
    }
}

/// List the statements in `dir`, sorted by file name.
pub(crate) fn discover_statements(dir: &Path) -> std::io::Result<Vec<(PathBuf, StatementFormat)>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match detect_statement_format(&path) {
            Some(format) => found.push((path, format)),
            None => log::debug!("ignoring {}", path.display()),
        }
    }
    found.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    Ok(found)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
