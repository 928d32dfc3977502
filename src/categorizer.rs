pub const FALLBACK_CATEGORY: &str = "Miscellaneous";

pub struct CategoryRule {
    pub name: &'static str,
    /// Lowercase substrings; any hit assigns the category.
    pub keywords: &'static [&'static str],
}

/// Evaluated top to bottom; the first rule with a matching keyword wins, so
/// order is part of the contract. The fallback carries no keywords and stays
/// last.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "Food & Dining",
        keywords: &[
            "coffee", "starbucks", "restaurant", "lunch", "dinner", "groceries", "grocery",
            "mcdonalds", "cafe", "kfc", "burger king", "pizza", "food", "bakery", "dining", "eats",
        ],
    },
    CategoryRule {
        name: "Utilities",
        keywords: &[
            "electricity", "water bill", "gas bill", "internet", "phone bill", "comcast",
            "verizon", "at&t", "utility", "power", "broadband",
        ],
    },
    CategoryRule {
        name: "Transport",
        keywords: &[
            "uber", "lyft", "gasoline", "shell", "mobil", "bp", "chevron", "subway", "metro",
            "taxi", "parking", "bus", "train", "fuel", "transportation",
        ],
    },
    CategoryRule {
        name: "Shopping",
        keywords: &[
            "amazon", "target", "walmart", "macys", "best buy", "clothes", "shoes", "apparel",
            "store", "market", "shop", "purchase", "retail",
        ],
    },
    CategoryRule {
        name: "Entertainment",
        keywords: &[
            "netflix", "spotify", "hulu", "cinema", "movies", "concert", "games", "disney",
            "steam", "playstation", "xbox", "music", "theater",
        ],
    },
    CategoryRule {
        name: "Health & Wellness",
        keywords: &[
            "pharmacy", "cvs", "walgreens", "doctor", "hospital", "gym", "fitness", "health",
            "medical", "clinic", "dentist",
        ],
    },
    CategoryRule {
        name: "Travel",
        keywords: &[
            "airbnb", "hotel", "flight", "booking.com", "expedia", "airline", "travel",
            "vacation", "trip",
        ],
    },
    CategoryRule {
        name: "Housing",
        keywords: &["rent", "mortgage", "hoa", "strata", "housing"],
    },
    CategoryRule {
        name: "Education",
        keywords: &["school", "college", "university", "tuition", "books", "course"],
    },
    CategoryRule {
        name: "Income",
        keywords: &["salary", "paycheck", "deposit", "interest income", "dividend"],
    },
    CategoryRule {
        name: FALLBACK_CATEGORY,
        keywords: &[],
    },
];

fn matches(description_lower: &str, rule: &CategoryRule) -> bool {
    rule.keywords.iter().any(|kw| description_lower.contains(kw))
}

/// Map a transaction description to exactly one category name.
pub fn categorize(description: Option<&str>) -> &'static str {
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return FALLBACK_CATEGORY;
    };
    let lower = description.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| matches(&lower, rule))
        .map_or(FALLBACK_CATEGORY, |rule| rule.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_descriptions() {
        let cases = [
            ("Starbucks coffee morning", "Food & Dining"),
            ("Monthly electricity bill", "Utilities"),
            ("Uber ride to airport", "Transport"),
            ("Amazon purchase electronics", "Shopping"),
            ("Netflix subscription", "Entertainment"),
            ("CVS Pharmacy prescription", "Health & Wellness"),
            ("Flight to London on BA", "Travel"),
            ("Rent payment for apartment", "Housing"),
            ("University tuition fee", "Education"),
            ("Salary deposit from work", "Income"),
            ("BP Gas", "Transport"),
            ("A random unknown transaction", FALLBACK_CATEGORY),
        ];
        for (description, expected) in cases {
            assert_eq!(categorize(Some(description)), expected, "{description}");
        }
    }

    #[test]
    fn test_empty_or_missing_description() {
        assert_eq!(categorize(None), FALLBACK_CATEGORY);
        assert_eq!(categorize(Some("")), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize(Some("COFFEE TIME")), "Food & Dining");
        assert_eq!(categorize(Some("My CoFfEe")), "Food & Dining");
        assert_eq!(categorize(Some("NETFLIX.COM")), "Entertainment");
    }

    #[test]
    fn test_earlier_rule_wins() {
        // coffee (Food & Dining) and hotel (Travel)
        assert_eq!(categorize(Some("Hotel lobby coffee")), "Food & Dining");
        // store (Shopping) and books (Education)
        assert_eq!(categorize(Some("Books store")), "Shopping");
        // uber (Transport) and eats (Food & Dining) - eats is defined first
        assert_eq!(categorize(Some("Uber Eats order")), "Food & Dining");
    }

    #[test]
    fn test_table_shape() {
        let last = CATEGORY_RULES.last().unwrap();
        assert_eq!(last.name, FALLBACK_CATEGORY);
        assert!(last.keywords.is_empty());
        for rule in CATEGORY_RULES {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword '{kw}' must be lowercase");
            }
        }
    }
}
