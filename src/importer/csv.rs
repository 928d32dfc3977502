use std::path::Path;

use crate::amount::{parse_amount, to_f64};
use crate::categorizer::categorize;
use crate::error::{Result, SpendwiseError};
use crate::headers::{map_headers, Columns};
use crate::models::{ParseResult, TransactionRecord};

/// Read a delimited text export with a header row.
///
/// Dates are kept exactly as written in the file.
pub fn parse_csv(file_path: &Path) -> ParseResult {
    let mut result = ParseResult::default();
    if let Err(e) = read_csv(file_path, &mut result) {
        tracing::error!("Failed to read CSV file {}: {e}", file_path.display());
    }
    result
}

fn read_csv(file_path: &Path, result: &mut ParseResult) -> Result<()> {
    let content = std::fs::read_to_string(file_path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let map = map_headers(&headers);
    let Some(columns) = map.resolve() else {
        return Err(SpendwiseError::MissingColumns(format!(
            "{} (found: {})",
            map.missing().join(", "),
            headers.join(", ")
        )));
    };

    for (i, record) in rdr.records().enumerate() {
        let row_num = i + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping CSV row {row_num} in {}: {e}", file_path.display());
                result.skip();
                continue;
            }
        };
        match read_row(&record, &columns) {
            Ok(txn) => result.push(txn),
            Err(reason) => {
                tracing::warn!(
                    "Skipping CSV row {row_num} in {}: {reason}. Row: {:?}",
                    file_path.display(),
                    record
                );
                result.skip();
            }
        }
    }
    Ok(())
}

fn field(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|v| !v.trim().is_empty())
}

fn read_row(record: &csv::StringRecord, columns: &Columns) -> std::result::Result<TransactionRecord, String> {
    let (Some(date), Some(description), Some(amount_raw)) = (
        field(record, columns.date),
        field(record, columns.description),
        field(record, columns.amount),
    ) else {
        return Err("missing date, description or amount".to_string());
    };
    let amount = parse_amount(amount_raw).ok_or_else(|| format!("invalid amount '{amount_raw}'"))?;
    Ok(TransactionRecord {
        date: date.to_string(),
        description: description.to_string(),
        amount: to_f64(amount),
        category: categorize(Some(description)).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::FALLBACK_CATEGORY;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_valid_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "valid.csv",
            "Date,Description,Amount\n2023-01-15,Coffee Shop,5.75\n2023-01-16,Grocery Store,75.20\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.skipped_count, 0);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].description, "Coffee Shop");
        assert_eq!(result.transactions[0].amount, 5.75);
        assert_eq!(result.transactions[0].category, "Food & Dining");
        assert_eq!(result.transactions[1].category, "Food & Dining");
    }

    #[test]
    fn test_invalid_amount_row_is_skipped_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "invalid_row.csv",
            "Date,Description,Amount\n\
             2023-01-17,Book Store,15.00\n\
             2023-01-18,Invalid Data,ABC\n\
             2023-01-19,Electronics Store,120.50\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(result.transactions[0].description, "Book Store");
        assert_eq!(result.transactions[0].category, "Shopping");
        assert_eq!(result.transactions[1].description, "Electronics Store");
        assert_eq!(result.transactions[1].amount, 120.5);
    }

    #[test]
    fn test_headers_only_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "empty.csv", "Date,Description,Amount\n");
        assert_eq!(parse_csv(&path), ParseResult::default());
    }

    #[test]
    fn test_missing_header_rejects_file_without_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "missing_header.csv",
            "Date,Details\n2023-01-20,Test Data\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 0);
        assert_eq!(result.skipped_count, 0);
        assert!(result.transactions.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = parse_csv(Path::new("non_existent_file.csv"));
        assert_eq!(result, ParseResult::default());
    }

    #[test]
    fn test_bom_and_header_variants() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "bank.csv",
            "\u{feff}Posting Date,Memo,Value\n01/15/2023,Netflix,\"1,234.56\"\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 1);
        let txn = &result.transactions[0];
        // Dates pass through untouched.
        assert_eq!(txn.date, "01/15/2023");
        assert_eq!(txn.amount, 1234.56);
        assert_eq!(txn.category, "Entertainment");
    }

    #[test]
    fn test_european_amounts_and_negatives() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "eu.csv",
            "date,description,amount\n2023-02-01,Supermarket,\"1.234,56\"\n2023-02-02,Refund,-12.50\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.transactions[0].amount, 1234.56);
        assert_eq!(result.transactions[1].amount, -12.5);
        assert_eq!(result.transactions[1].category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_short_and_blank_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "ragged.csv",
            "Date,Description,Amount\n\
             2023-03-01,Short row\n\
             2023-03-02,,10.00\n\
             2023-03-03,Pizza night,18.00,extra\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.skipped_count, 2);
        assert_eq!(result.transactions[0].description, "Pizza night");
    }

    #[test]
    fn test_records_satisfy_invariants() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "mixed.csv",
            "Date,Description,Amount\n2023-04-01,Uber,$9.99\n2023-04-02,Rent,\"$1,500\"\n2023-04-03,Mystery,?\n",
        );
        let result = parse_csv(&path);
        assert_eq!(result.success_count, result.transactions.len());
        for txn in &result.transactions {
            assert!(!txn.description.is_empty());
            assert!(crate::categorizer::CATEGORY_RULES
                .iter()
                .any(|rule| rule.name == txn.category));
        }
    }
}
