use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::TransactionRecord;

pub const TRANSACTIONS_FILE: &str = "transactions.jsonl";

/// Append records to a JSON Lines file, one object per line. Returns the
/// number of lines written.
pub fn append_transactions(path: &Path, transactions: &[TransactionRecord]) -> Result<usize> {
    if transactions.is_empty() {
        tracing::info!("No transactions to save");
        return Ok(0);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut buf = String::new();
    for txn in transactions {
        buf.push_str(&serde_json::to_string(txn)?);
        buf.push('\n');
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(buf.as_bytes())?;

    tracing::info!("Appended {} transactions to {}", transactions.len(), path.display());
    Ok(transactions.len())
}

/// Load every record from a JSON Lines file. Malformed lines are logged and
/// skipped; a missing file reads as empty.
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    if !path.exists() {
        tracing::info!("Transaction file {} not found", path.display());
        return Ok(Vec::new());
    }
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut transactions = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<TransactionRecord>(line) {
            Ok(txn) => transactions.push(txn),
            Err(e) => {
                tracing::warn!("Skipping malformed line {} in {}: {e}", i + 1, path.display());
            }
        }
    }
    tracing::debug!("Loaded {} transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}
