mod csv;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "xlsx")]
mod spreadsheet;

use std::path::Path;

use crate::error::{Result, SpendwiseError};
use crate::models::{ImportOutcome, ParseResult};

pub use self::csv::parse_csv;
#[cfg(feature = "pdf")]
pub use self::pdf::parse_pdf;
#[cfg(feature = "xlsx")]
pub use self::spreadsheet::parse_spreadsheet;

// ---------------------------------------------------------------------------
// Importer kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImporterKind {
    Csv,
    #[cfg(feature = "xlsx")]
    Spreadsheet,
    #[cfg(feature = "pdf")]
    Pdf,
}

impl ImporterKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            #[cfg(feature = "xlsx")]
            Self::Spreadsheet => "Spreadsheet",
            #[cfg(feature = "pdf")]
            Self::Pdf => "PDF",
        }
    }

    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::Csv => &["csv"],
            #[cfg(feature = "xlsx")]
            Self::Spreadsheet => &["xlsx", "xls", "xlsm", "ods"],
            #[cfg(feature = "pdf")]
            Self::Pdf => &["pdf"],
        }
    }

    /// Run the reader. Never fails: file-level problems are logged and show up
    /// as an empty (or partial) result.
    pub fn parse(&self, file_path: &Path) -> ParseResult {
        let result = match self {
            Self::Csv => parse_csv(file_path),
            #[cfg(feature = "xlsx")]
            Self::Spreadsheet => parse_spreadsheet(file_path),
            #[cfg(feature = "pdf")]
            Self::Pdf => parse_pdf(file_path),
        };
        log_summary(self.name(), file_path, &result);
        result
    }
}

const ALL_IMPORTERS: &[ImporterKind] = &[
    ImporterKind::Csv,
    #[cfg(feature = "xlsx")]
    ImporterKind::Spreadsheet,
    #[cfg(feature = "pdf")]
    ImporterKind::Pdf,
];

pub fn get_for_file(file_path: &Path) -> Option<ImporterKind> {
    let ext = file_path.extension()?.to_str()?.to_lowercase();
    ALL_IMPORTERS
        .iter()
        .find(|i| i.extensions().contains(&ext.as_str()))
        .copied()
}

pub fn supported_extensions() -> Vec<&'static str> {
    ALL_IMPORTERS
        .iter()
        .flat_map(|i| i.extensions().iter().copied())
        .collect()
}

/// Pick the reader from the file extension and run it.
pub fn parse_file(file_path: &Path) -> Result<ParseResult> {
    let importer = get_for_file(file_path).ok_or_else(|| {
        SpendwiseError::UnsupportedFormat(format!(
            "{} (expected one of: {})",
            file_path.display(),
            supported_extensions().join(", ")
        ))
    })?;
    Ok(importer.parse(file_path))
}

fn log_summary(kind: &str, file_path: &Path, result: &ParseResult) {
    match result.outcome() {
        ImportOutcome::NoData => {
            tracing::info!("No transaction data found in {kind} file {}", file_path.display());
        }
        _ => tracing::info!(
            success = result.success_count,
            skipped = result.skipped_count,
            "{kind} parsing for {} complete",
            file_path.display()
        ),
    }
}
