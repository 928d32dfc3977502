use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use crate::fmt::money;
use crate::settings::transactions_path;
use crate::store::load_transactions;

pub fn run() -> Result<()> {
    let transactions = load_transactions(&transactions_path())?;
    if transactions.is_empty() {
        println!("No transactions stored yet. Run `spendwise import FILE` first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Category", "Amount"]);
    for txn in &transactions {
        table.add_row(vec![
            Cell::new(&txn.date),
            Cell::new(&txn.description),
            Cell::new(&txn.category),
            Cell::new(money(txn.amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Transactions ({})\n{table}", transactions.len());
    Ok(())
}
