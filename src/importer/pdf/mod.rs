mod layout;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use pdf_extract::Document;

use crate::amount::{parse_amount, to_f64};
use crate::categorizer::categorize;
use crate::dates::looks_like_date;
use crate::error::{Result, SpendwiseError};
use crate::fmt::clean_text;
use crate::headers::{CanonicalField, ColumnMap, Columns};
use crate::models::{ParseResult, TransactionRecord};

use self::layout::PageLayout;

/// Rows of text cells. Row lengths may differ.
type Table = Vec<Vec<String>>;

const HEADER_SCAN_ROWS: usize = 3;
const CONTENT_SAMPLE_ROWS: usize = 5;
const DATA_ROW_SCAN: usize = 5;
const MIN_DESCRIPTION_LEN: usize = 10;

/// Substrings that mark a header cell in a statement table. Looser than the
/// CSV/spreadsheet variants since PDF headers are free text.
const PDF_HEADER_KEYWORDS: &[(CanonicalField, &[&str])] = &[
    (CanonicalField::Date, &["date", "day", "time", "when"]),
    (
        CanonicalField::Description,
        &["description", "details", "narrative", "memo", "activity", "item"],
    ),
    (
        CanonicalField::Amount,
        &["amount", "value", "sum", "total", "credit", "debit", "price", "cost"],
    ),
];

/// Extract transactions from the text tables of a PDF statement.
///
/// Image-only PDFs yield nothing. On a broken document the result holds
/// whatever was read before the failure.
pub fn parse_pdf(file_path: &Path) -> ParseResult {
    let mut result = ParseResult::default();
    if let Err(e) = read_pdf(file_path, &mut result) {
        tracing::error!("Failed to parse PDF {}: {e}", file_path.display());
    }
    result
}

// pdf-extract and lopdf panic on some malformed documents.
fn guarded<T>(what: &str, f: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|_| SpendwiseError::Pdf(format!("{what} panicked")))
}

fn read_pdf(file_path: &Path, result: &mut ParseResult) -> Result<()> {
    let bytes = std::fs::read(file_path)?;
    let mut doc = guarded("loading", || Document::load_mem(&bytes))?
        .map_err(|e| SpendwiseError::Pdf(e.to_string()))?;
    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| SpendwiseError::Pdf(format!("encrypted document: {e}")))?;
        // Decrypted in place; pdf-extract warns on every page otherwise.
        doc.trailer.remove(b"Encrypt");
    }

    for page_no in doc.get_pages().into_keys() {
        let mut layout = PageLayout::default();
        guarded(&format!("page {page_no}"), || {
            pdf_extract::output_doc_page(&doc, &mut layout, page_no)
        })?
        .map_err(|e| SpendwiseError::Pdf(format!("page {page_no}: {e}")))?;
        read_page(&layout.rows(), page_no as usize, result);
    }
    Ok(())
}

fn read_page(rows: &[Vec<String>], page_no: usize, result: &mut ParseResult) {
    let tables = split_into_tables(rows);
    tracing::info!("PDF page {page_no}: found {} tables", tables.len());
    for (table_idx, table) in tables.iter().enumerate() {
        extract_table(table, result, page_no, table_idx + 1);
    }
}

// ---------------------------------------------------------------------------
// Table segmentation
// ---------------------------------------------------------------------------

/// A table is a run of consecutive lines with at least two cells. Anything
/// else (titles, footers) closes the current table.
fn split_into_tables(rows: &[Vec<String>]) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Table = Vec::new();
    for cells in rows {
        if cells.len() >= 2 {
            current.push(cells.clone());
        } else if !current.is_empty() {
            tables.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tables.push(current);
    }
    tables
}

// ---------------------------------------------------------------------------
// Column identification
// ---------------------------------------------------------------------------

fn cell_at(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(String::as_str)
}

fn scan_headers(table: &Table, map: &mut ColumnMap) {
    for row in table.iter().take(HEADER_SCAN_ROWS) {
        for (col, cell) in row.iter().enumerate() {
            let lower = clean_text(cell).to_lowercase();
            let claimed = PDF_HEADER_KEYWORDS.iter().find(|(field, keywords)| {
                map.get(*field).is_none() && keywords.iter().any(|kw| lower.contains(kw))
            });
            if let Some((field, _)) = claimed {
                map.set(*field, col);
            }
        }
    }
}

/// Claims date and amount columns from sampled cell shapes, then the first
/// leftover column with long text as description.
fn guess_from_content(table: &Table, map: &mut ColumnMap) {
    let end = table.len().min(HEADER_SCAN_ROWS + CONTENT_SAMPLE_ROWS);
    let sample = &table[HEADER_SCAN_ROWS..end];
    let width = table.first().map_or(0, Vec::len);

    for col in 0..width {
        if map.is_assigned(col) {
            continue;
        }
        let cells: Vec<&str> = sample.iter().filter_map(|row| cell_at(row, col)).collect();
        if cells.is_empty() {
            continue;
        }
        if map.date.is_none() && cells.iter().any(|c| looks_like_date(c)) {
            tracing::debug!("PDF: guessed date column {col} from content");
            map.date = Some(col);
        } else if map.amount.is_none() && cells.iter().any(|c| parse_amount(c).is_some()) {
            tracing::debug!("PDF: guessed amount column {col} from content");
            map.amount = Some(col);
        }
    }

    if map.description.is_none() {
        let guess = (0..width).filter(|col| !map.is_assigned(*col)).find(|col| {
            sample
                .iter()
                .filter_map(|row| cell_at(row, *col))
                .any(|c| clean_text(c).chars().count() > MIN_DESCRIPTION_LEN)
        });
        if let Some(col) = guess {
            tracing::debug!("PDF: guessed description column {col} from content");
            map.description = Some(col);
        }
    }
}

fn identify_columns(table: &Table) -> Option<Columns> {
    if table.first().map_or(true, Vec::is_empty) {
        return None;
    }
    let mut map = ColumnMap::default();
    scan_headers(table, &mut map);
    if !map.is_complete() && table.len() > HEADER_SCAN_ROWS {
        tracing::debug!("PDF: header match incomplete, trying content-based detection");
        guess_from_content(table, &mut map);
    }
    if !map.is_complete() {
        tracing::warn!("PDF: could not identify all required columns: {map:?}");
    }
    map.resolve()
}

fn is_data_row(row: &[String], columns: &Columns) -> bool {
    cell_at(row, columns.amount).is_some_and(|c| parse_amount(c).is_some())
        || cell_at(row, columns.date).is_some_and(looks_like_date)
}

/// Index of the first data row. Defaults to 1 when none of the scanned rows
/// look like data.
fn count_header_rows(table: &Table, columns: &Columns) -> usize {
    table
        .iter()
        .take(DATA_ROW_SCAN)
        .position(|row| is_data_row(row, columns))
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// Row extraction
// ---------------------------------------------------------------------------

fn extract_table(table: &Table, result: &mut ParseResult, page_no: usize, table_no: usize) {
    if table.first().map_or(true, Vec::is_empty) {
        tracing::info!("PDF P{page_no} T{table_no}: table is empty or malformed");
        result.skip_many(table.len());
        return;
    }
    let Some(columns) = identify_columns(table) else {
        tracing::warn!("PDF P{page_no} T{table_no}: skipping table, required columns not found");
        result.skip_many(table.len());
        return;
    };

    let header_rows = count_header_rows(table, &columns);
    tracing::info!(
        "PDF P{page_no} T{table_no}: columns {columns:?}, assuming {header_rows} header rows"
    );

    for (row_idx, row) in table.iter().enumerate().skip(header_rows) {
        match extract_row(row, &columns) {
            Ok(txn) => result.push(txn),
            Err(reason) => {
                tracing::warn!("PDF P{page_no} T{table_no} R{row_idx}: skipped, {reason}");
                result.skip();
            }
        }
    }
}

fn extract_row(row: &[String], columns: &Columns) -> std::result::Result<TransactionRecord, String> {
    let (Some(date), Some(description), Some(amount_raw)) = (
        cell_at(row, columns.date),
        cell_at(row, columns.description),
        cell_at(row, columns.amount),
    ) else {
        return Err("missing mapped columns".to_string());
    };
    let date = clean_text(date);
    let description = clean_text(description);
    let amount_raw = clean_text(amount_raw);

    if !looks_like_date(&date) {
        return Err(format!("'{date}' is not date-like"));
    }
    if description.is_empty() || amount_raw.is_empty() {
        return Err("empty description or amount".to_string());
    }
    let amount = parse_amount(&amount_raw).ok_or_else(|| format!("invalid amount '{amount_raw}'"))?;

    Ok(TransactionRecord {
        category: categorize(Some(&description)).to_string(),
        date,
        description,
        amount: to_f64(amount),
    })
}
