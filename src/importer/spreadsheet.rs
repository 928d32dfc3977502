use std::path::Path;

use calamine::{Data, Range, Reader};

use crate::amount::{parse_amount, to_f64};
use crate::categorizer::categorize;
use crate::dates::{excel_serial_to_date, normalize_date};
use crate::error::{Result, SpendwiseError};
use crate::fmt::clean_text;
use crate::headers::{map_headers, Columns};
use crate::models::{ParseResult, TransactionRecord};

/// Read the first worksheet of an xlsx/xls/xlsm/ods workbook.
///
/// The first row is the header row. Dates come out as `YYYY-MM-DD`.
pub fn parse_spreadsheet(file_path: &Path) -> ParseResult {
    let mut result = ParseResult::default();
    if let Err(e) = read_spreadsheet(file_path, &mut result) {
        tracing::error!("Failed to read spreadsheet {}: {e}", file_path.display());
    }
    result
}

fn read_spreadsheet(file_path: &Path, result: &mut ParseResult) -> Result<()> {
    let mut workbook = calamine::open_workbook_auto(file_path)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        tracing::warn!("Workbook {} has no worksheets", file_path.display());
        return Ok(());
    };
    read_range(&range?, result)
}

fn read_range(range: &Range<Data>, result: &mut ParseResult) -> Result<()> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(());
    };
    let data_rows = range.height().saturating_sub(1);
    if data_rows == 0 {
        return Ok(());
    }

    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();
    let map = map_headers(&headers);
    let Some(columns) = map.resolve() else {
        // A sheet with the wrong headers still had rows; count them all.
        result.skip_many(data_rows);
        return Err(SpendwiseError::MissingColumns(format!(
            "{} (found: {})",
            map.missing().join(", "),
            headers.join(", ")
        )));
    };

    for (i, row) in rows.enumerate() {
        match read_row(row, &columns) {
            Ok(txn) => result.push(txn),
            Err(reason) => {
                // +2: one for the header, one for 1-based numbering.
                tracing::warn!("Skipping spreadsheet row {}: {reason}", i + 2);
                result.skip();
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell(row: &[Data], idx: usize) -> Option<&Data> {
    row.get(idx).filter(|c| !is_blank(c))
}

fn cell_date(cell: &Data) -> Option<String> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::DateTimeIso(s) | Data::String(s) => normalize_date(s),
        other => normalize_date(&other.to_string()),
    }
}

fn cell_amount(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_amount(s).map(to_f64),
        other => parse_amount(&other.to_string()).map(to_f64),
    }
}

fn read_row(row: &[Data], columns: &Columns) -> std::result::Result<TransactionRecord, String> {
    let (Some(date_cell), Some(desc_cell), Some(amount_cell)) = (
        cell(row, columns.date),
        cell(row, columns.description),
        cell(row, columns.amount),
    ) else {
        return Err("missing date, description or amount".to_string());
    };

    let date = cell_date(date_cell).ok_or_else(|| format!("unrecognized date '{date_cell}'"))?;
    let amount =
        cell_amount(amount_cell).ok_or_else(|| format!("invalid amount '{amount_cell}'"))?;
    let description = clean_text(&desc_cell.to_string());

    Ok(TransactionRecord {
        category: categorize(Some(&description)).to_string(),
        date,
        description,
        amount,
    })
}
