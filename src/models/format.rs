use std::fmt;

/// The statement layouts the importer knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementFormat {
    /// Chequing account history export: five positional CSV columns.
    CheckingCsv,
    /// Credit card PDF whose rows start with an upper-case token like `JAN6`.
    CardPdf,
    /// Credit card PDF that went through an OCR round trip; rows start `Dec 25`.
    OcrCardPdf,
}

impl StatementFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::CheckingCsv => "checking csv",
            Self::CardPdf => "card pdf",
            Self::OcrCardPdf => "ocr card pdf",
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
