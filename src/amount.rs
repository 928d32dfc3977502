use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::fmt::clean_text;

const CURRENCY_MARKERS: &[&str] = &["$", "€", "£", "USD", "EUR", "GBP"];

/// `1,234.56`: comma groups thousands, dot is the decimal point.
fn us_grouping_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d,\d{3}\.\d{2}").expect("us grouping regex"))
}

/// `1.234,56`: dot groups thousands, comma is the decimal point.
fn eu_grouping_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d\.\d{3},\d{2}").expect("eu grouping regex"))
}

fn amount_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[$€£]?\s*-?[\d,]+\.?\d{0,2}").expect("amount token regex"))
}

/// Parse a raw amount token into a decimal.
///
/// Handles currency symbols and codes, US (`1,234.56`) and European
/// (`1.234,56`) separators, and falls back to the first amount-shaped
/// substring when the whole token does not parse. Returns `None` when nothing
/// numeric can be recovered; callers treat that as a skipped row.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let text = clean_text(raw);

    let mut stripped = text.clone();
    for marker in CURRENCY_MARKERS {
        stripped = stripped.replace(marker, "");
    }
    let stripped = stripped.trim();

    let normalized = if us_grouping_re().is_match(stripped) {
        stripped.replace(',', "")
    } else if eu_grouping_re().is_match(stripped) {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.replace(',', "")
    };

    if let Ok(value) = Decimal::from_str(&normalized) {
        return Some(value);
    }

    let token = amount_token_re().find(&text)?;
    let digits: String = token
        .as_str()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();
    let digits = digits.trim().trim_end_matches('.');
    Decimal::from_str(digits).ok()
}

/// Records carry amounts as `f64`.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
