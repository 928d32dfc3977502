use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::fmt::clean_text;

const ISO_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
// Month-first wins when a token is valid both ways.
const SLASHED_FORMATS: &[&str] = &["%m/%d/%Y", "%d/%m/%Y"];
// %B also accepts abbreviated month names when parsing.
const WRITTEN_FORMATS: &[&str] = &["%d %B %Y"];

fn date_shape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,}\s+\d{2,4})",
        )
        .expect("date shape regex")
    })
}

fn year_month_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}").expect("year-month regex"))
}

fn try_formats(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(raw, fmt)
            .ok()
            // %Y happily reads "23" as year 23.
            .filter(|d| d.year() >= 1000)
    })
}

/// Parse a date token into `YYYY-MM-DD`.
///
/// Accepts ISO dates (dash or slash, optionally followed by a time part),
/// `MM/DD/YYYY`, `DD/MM/YYYY` and `D Month YYYY`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let s = clean_text(raw);
    if s.is_empty() {
        return None;
    }
    let date = try_formats(&s, ISO_FORMATS)
        .or_else(|| s.get(..10).and_then(|head| try_formats(head, ISO_FORMATS)))
        .or_else(|| try_formats(&s, SLASHED_FORMATS))
        .or_else(|| try_formats(&s, WRITTEN_FORMATS))?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// `YYYY-MM` bucket for a stored date string. Anything starting with
/// `YYYY-MM` is accepted even when the rest does not parse.
pub fn year_month(raw: &str) -> Option<String> {
    if let Some(date) = normalize_date(raw) {
        return Some(date[..7].to_string());
    }
    let s = raw.trim();
    year_month_prefix_re()
        .find(s)
        .map(|m| m.as_str().to_string())
}

/// Shape-only check used to locate date columns in extracted tables. Does not
/// validate that the date exists.
pub fn looks_like_date(raw: &str) -> bool {
    date_shape_re().is_match(&clean_text(raw))
}

/// Excel stores dates as days since 1899-12-30 (the 1900 leap year bug is
/// baked into that epoch). Serial 1 is 1900-01-01; anything below it, or out
/// of chrono's range, is not a date.
pub fn excel_serial_to_date(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = base.checked_add_signed(Duration::try_days(serial.trunc() as i64)?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_dates() {
        assert_eq!(normalize_date("2023-01-15"), Some("2023-01-15".to_string()));
        assert_eq!(normalize_date("2023/1/5"), Some("2023-01-05".to_string()));
        assert_eq!(normalize_date("2023-01-15 00:00:00"), Some("2023-01-15".to_string()));
        assert_eq!(normalize_date("2023-01-15T08:30:00"), Some("2023-01-15".to_string()));
    }

    #[test]
    fn test_slashed_dates() {
        assert_eq!(normalize_date("01/15/2023"), Some("2023-01-15".to_string()));
        assert_eq!(normalize_date("15/01/2023"), Some("2023-01-15".to_string()));
        // Ambiguous tokens read month-first.
        assert_eq!(normalize_date("02/03/2023"), Some("2023-02-03".to_string()));
    }

    #[test]
    fn test_written_dates() {
        assert_eq!(normalize_date("5 Jan 2023"), Some("2023-01-05".to_string()));
        assert_eq!(normalize_date("15 January 2023"), Some("2023-01-15".to_string()));
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert_eq!(normalize_date("02/30/2023"), None);
        assert_eq!(normalize_date("13/13/2023"), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("01/15/23"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_year_month() {
        assert_eq!(year_month("2023-01-15"), Some("2023-01".to_string()));
        assert_eq!(year_month("03/20/2023"), Some("2023-03".to_string()));
        assert_eq!(year_month("2023-07 (pending)"), Some("2023-07".to_string()));
        assert_eq!(year_month("Jan 2023"), None);
    }

    #[test]
    fn test_looks_like_date_is_shape_only() {
        assert!(looks_like_date("2023-01-15"));
        assert!(looks_like_date("01/15/2023"));
        assert!(looks_like_date("15 Jan 2023"));
        assert!(looks_like_date(" 1-2-23 "));
        // Shape is enough even when the calendar says otherwise.
        assert!(looks_like_date("99/99/9999"));
        assert!(!looks_like_date("Date"));
        assert!(!looks_like_date("Posted 01/15/2023"));
        assert!(!looks_like_date("42.10"));
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), Some("2025-01-10".to_string()));
        assert_eq!(excel_serial_to_date(44941.75), Some("2023-01-15".to_string()));
        assert_eq!(excel_serial_to_date(1.0), Some("1900-01-01".to_string()));
    }

    #[test]
    fn test_excel_serial_out_of_range() {
        for serial in [0.0, 0.5, -5.0, 1e18, -1e18, f64::NAN, f64::INFINITY] {
            assert_eq!(excel_serial_to_date(serial), None, "{serial}");
        }
    }
}
