use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::fmt::money;
use crate::models::TransactionRecord;
use crate::reports::{self, CategoryTotal, MonthTotal};
use crate::settings::transactions_path;
use crate::store::load_transactions;

fn stored() -> Result<Vec<TransactionRecord>> {
    Ok(load_transactions(&transactions_path())?)
}

pub fn total() -> Result<()> {
    let total = reports::total_spent(&stored()?);
    println!("Total spent: {}", money(total).bold());
    Ok(())
}

pub fn monthly() -> Result<()> {
    let trend = reports::monthly_trend(&stored()?);
    println!("{}", format_monthly(&trend));
    Ok(())
}

pub fn categories() -> Result<()> {
    let breakdown = reports::category_breakdown(&stored()?);
    println!("{}", format_categories(&breakdown));
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub fn format_monthly(trend: &[MonthTotal]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Spent"]);
    for row in trend {
        table.add_row(vec![Cell::new(&row.month), Cell::new(money(row.total))]);
    }
    format!("Monthly Spending\n{table}")
}

pub fn format_categories(breakdown: &[CategoryTotal]) -> String {
    let grand: f64 = breakdown.iter().map(|c| c.total).sum();
    let mut table = Table::new();
    table.set_header(vec!["Category", "Spent", "%"]);
    for row in breakdown {
        let pct = if grand > 0.0 { row.total / grand * 100.0 } else { 0.0 };
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(money(row.total)),
            Cell::new(format!("{pct:.1}%")),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(grand)),
        Cell::new(""),
    ]);
    format!("Spending by Category\n{table}")
}
