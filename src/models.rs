use serde::{Deserialize, Serialize};

/// One canonical transaction produced by a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// Output of every reader: the records it produced plus how many rows it
/// had to drop along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub transactions: Vec<TransactionRecord>,
    pub success_count: usize,
    pub skipped_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported,
    /// Rows were recognized but none survived validation.
    AllSkipped,
    NoData,
}

impl ParseResult {
    pub fn push(&mut self, record: TransactionRecord) {
        self.transactions.push(record);
        self.success_count += 1;
    }

    pub fn skip(&mut self) {
        self.skipped_count += 1;
    }

    pub fn skip_many(&mut self, rows: usize) {
        self.skipped_count += rows;
    }

    pub fn outcome(&self) -> ImportOutcome {
        if self.success_count > 0 {
            ImportOutcome::Imported
        } else if self.skipped_count > 0 {
            ImportOutcome::AllSkipped
        } else {
            ImportOutcome::NoData
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(desc: &str) -> TransactionRecord {
        TransactionRecord {
            date: "2023-01-15".to_string(),
            description: desc.to_string(),
            amount: 5.75,
            category: "Food & Dining".to_string(),
        }
    }

    #[test]
    fn test_push_keeps_count_in_sync() {
        let mut result = ParseResult::default();
        result.push(record("Coffee"));
        result.push(record("Lunch"));
        result.skip();
        assert_eq!(result.success_count, result.transactions.len());
        assert_eq!(result.skipped_count, 1);
    }

    #[test]
    fn test_outcome() {
        let mut result = ParseResult::default();
        assert_eq!(result.outcome(), ImportOutcome::NoData);
        result.skip_many(3);
        assert_eq!(result.outcome(), ImportOutcome::AllSkipped);
        result.push(record("Coffee"));
        assert_eq!(result.outcome(), ImportOutcome::Imported);
    }

    #[test]
    fn test_json_shape() {
        let mut result = ParseResult::default();
        result.push(record("Coffee"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success_count"], 1);
        assert_eq!(value["skipped_count"], 0);
        assert_eq!(value["transactions"][0]["date"], "2023-01-15");
        assert_eq!(value["transactions"][0]["amount"], 5.75);
        assert_eq!(value["transactions"][0]["category"], "Food & Dining");
    }
}
