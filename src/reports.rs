use std::collections::BTreeMap;

use serde::Serialize;

use crate::dates::year_month;
use crate::models::TransactionRecord;

// ---------------------------------------------------------------------------
// Dashboard aggregations. Only positive amounts (spending) count.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

fn spending(transactions: &[TransactionRecord]) -> impl Iterator<Item = &TransactionRecord> {
    transactions.iter().filter(|t| t.amount > 0.0)
}

pub fn total_spent(transactions: &[TransactionRecord]) -> f64 {
    round2(spending(transactions).map(|t| t.amount).sum())
}

/// Spending per `YYYY-MM`, oldest month first.
pub fn monthly_trend(transactions: &[TransactionRecord]) -> Vec<MonthTotal> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for txn in spending(transactions) {
        let Some(month) = year_month(&txn.date) else {
            tracing::warn!("Could not parse date '{}' for monthly trend", txn.date);
            continue;
        };
        *months.entry(month).or_default() += txn.amount;
    }
    months
        .into_iter()
        .map(|(month, total)| MonthTotal { month, total: round2(total) })
        .collect()
}

/// Spending per category, largest first.
pub fn category_breakdown(transactions: &[TransactionRecord]) -> Vec<CategoryTotal> {
    let mut categories: BTreeMap<&str, f64> = BTreeMap::new();
    for txn in spending(transactions) {
        *categories.entry(txn.category.as_str()).or_default() += txn.amount;
    }
    let mut breakdown: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total: round2(total),
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));
    breakdown
}
