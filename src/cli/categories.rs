use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};

use crate::categorizer::{categorize, CATEGORY_RULES};

pub fn categorize_one(description: &str) -> Result<()> {
    println!("{}", categorize(Some(description)));
    Ok(())
}

pub fn list() -> Result<()> {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Keywords"]);
    for rule in CATEGORY_RULES {
        let keywords = if rule.keywords.is_empty() {
            "(fallback)".to_string()
        } else {
            rule.keywords.join(", ")
        };
        table.add_row(vec![Cell::new(rule.name), Cell::new(keywords)]);
    }
    println!("Categories (first match wins)\n{table}");
    Ok(())
}
