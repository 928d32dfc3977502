pub mod categories;
pub mod import;
pub mod init;
pub mod list;
pub mod report;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spendwise",
    about = "Turn bank statement exports (CSV, spreadsheet, PDF) into categorized transactions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and write the settings file.
    Init {
        /// Path for spendwise data (default: ~/Documents/spendwise)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Extract transactions from a CSV, spreadsheet or PDF statement.
    Import {
        /// Statement file (.csv, .xlsx, .xls, .xlsm, .ods, .pdf)
        file: String,
        /// Parse and report without saving anything
        #[arg(long)]
        dry_run: bool,
        /// Print the parse result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show stored transactions.
    List,
    /// Spending reports over stored transactions.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Print the category a description would get.
    Categorize {
        description: String,
    },
    /// Show the category keyword table.
    Categories,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total spending (positive amounts only).
    Total,
    /// Spending per month.
    Monthly,
    /// Spending per category, largest first.
    Categories,
}
