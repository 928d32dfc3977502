mod amount;
mod categorizer;
mod cli;
mod dates;
mod error;
mod fmt;
mod headers;
mod importer;
mod models;
mod reports;
mod settings;
mod store;

use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as log_fmt, EnvFilter};

use cli::{Cli, Commands, ReportCommands};

/// Log to stderr so stdout stays clean for tables and JSON. `RUST_LOG`
/// overrides the level from settings.
fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(log_fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&settings::load_settings().log_level);

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import {
            file,
            dry_run,
            json,
        } => cli::import::run(&file, dry_run, json),
        Commands::List => cli::list::run(),
        Commands::Report { command } => match command {
            ReportCommands::Total => cli::report::total(),
            ReportCommands::Monthly => cli::report::monthly(),
            ReportCommands::Categories => cli::report::categories(),
        },
        Commands::Categorize { description } => cli::categories::categorize_one(&description),
        Commands::Categories => cli::categories::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
