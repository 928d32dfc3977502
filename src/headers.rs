#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Date,
    Description,
    Amount,
}

impl CanonicalField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Description => "description",
            Self::Amount => "amount",
        }
    }
}

const ALL_FIELDS: [CanonicalField; 3] = [
    CanonicalField::Date,
    CanonicalField::Description,
    CanonicalField::Amount,
];

/// Spellings accepted for each canonical field in CSV and spreadsheet header
/// rows. Compared against the trimmed, lowercased header.
pub const HEADER_VARIANTS: &[(CanonicalField, &[&str])] = &[
    (CanonicalField::Date, &["date", "transaction date", "posting date"]),
    (CanonicalField::Description, &["description", "narrative", "details", "memo"]),
    (CanonicalField::Amount, &["amount", "value", "credit", "debit"]),
];

/// Column index per canonical field; `None` while unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
}

/// A column map with every field resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl ColumnMap {
    pub fn get(&self, field: CanonicalField) -> Option<usize> {
        match field {
            CanonicalField::Date => self.date,
            CanonicalField::Description => self.description,
            CanonicalField::Amount => self.amount,
        }
    }

    pub fn set(&mut self, field: CanonicalField, column: usize) {
        let slot = match field {
            CanonicalField::Date => &mut self.date,
            CanonicalField::Description => &mut self.description,
            CanonicalField::Amount => &mut self.amount,
        };
        *slot = Some(column);
    }

    pub fn is_assigned(&self, column: usize) -> bool {
        ALL_FIELDS.iter().any(|f| self.get(*f) == Some(column))
    }

    pub fn is_complete(&self) -> bool {
        self.resolve().is_some()
    }

    pub fn missing(&self) -> Vec<&'static str> {
        ALL_FIELDS
            .iter()
            .filter(|f| self.get(**f).is_none())
            .map(|f| f.name())
            .collect()
    }

    pub fn resolve(&self) -> Option<Columns> {
        Some(Columns {
            date: self.date?,
            description: self.description?,
            amount: self.amount?,
        })
    }
}

/// Map a header row to canonical fields. Each field takes the first column
/// whose header is one of its known spellings.
pub fn map_headers<S: AsRef<str>>(headers: &[S]) -> ColumnMap {
    let lowered: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();
    let mut map = ColumnMap::default();
    for (field, variants) in HEADER_VARIANTS {
        if let Some(column) = lowered.iter().position(|h| variants.contains(&h.as_str())) {
            map.set(*field, column);
        }
    }
    map
}
