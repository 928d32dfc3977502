use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::importer::parse_file;
use crate::models::ImportOutcome;
use crate::settings::transactions_path;
use crate::store::append_transactions;

pub fn run(file: &str, dry_run: bool, json: bool) -> Result<()> {
    let file_path = PathBuf::from(file);
    let filename = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());

    let result = parse_file(&file_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match result.outcome() {
        ImportOutcome::Imported => {
            if !dry_run {
                let path = transactions_path();
                append_transactions(&path, &result.transactions)
                    .with_context(|| format!("saving transactions to {}", path.display()))?;
            }
            let verb = if dry_run { "Parsed" } else { "Imported" };
            eprintln!(
                "{}",
                format!("{verb} {} records from {filename}.", result.success_count).green()
            );
            if result.skipped_count > 0 {
                eprintln!(
                    "{}",
                    format!(
                        "{} records from {filename} were skipped or could not be fully processed.",
                        result.skipped_count
                    )
                    .yellow()
                );
            }
        }
        ImportOutcome::AllSkipped => eprintln!(
            "{}",
            format!(
                "Processed {filename}: no records were imported. {} records were skipped or could not be fully processed.",
                result.skipped_count
            )
            .yellow()
        ),
        ImportOutcome::NoData => eprintln!(
            "Could not extract any transaction data from {filename}. The file might be empty, \
             not contain recognizable transaction information, or be in an unsupported structure for its type."
        ),
    }
    Ok(())
}
