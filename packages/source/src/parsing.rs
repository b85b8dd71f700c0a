//! Field coercion helpers for raw incident records.
//!
//! Raw values arrive as JSON, either typed (from a JSON dump) or as plain
//! strings (from CSV). Every helper here is total: a value of the wrong
//! shape yields `None` rather than an error.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Largest float below which every integer is exactly representable (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Returns the string value as given, or `None` if absent, blank, or not a
/// string.
#[must_use]
pub fn parse_text(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?;
    (!s.trim().is_empty()).then(|| s.to_string())
}

/// Parses a finite number from a JSON number or a numeric string.
#[must_use]
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Parses a boolean from a JSON bool or a case-insensitive
/// `"true"`/`"false"` string.
#[must_use]
pub fn parse_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Parses a `YYYY-MM-DD` date, also accepting an ISO 8601 datetime whose
/// date part is used.
#[must_use]
pub fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let s = value?.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|dt| dt.date())
}

/// Extracts an incident identifier.
///
/// Accepts a non-blank string or a non-negative integral number. Every
/// other shape (null, blank, negative, fractional, boolean, array, object)
/// is rejected.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn parse_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                let f = n.as_f64()?;
                (f >= 0.0 && f.fract() == 0.0 && f <= MAX_EXACT_INTEGER).then(|| f as u64)
            })
            .map(|id| id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_is_trimmed_and_blank_is_absent() {
        assert_eq!(parse_text(Some(&json!("Reno"))), Some("Reno".to_string()));
        assert_eq!(parse_text(Some(&json!("  Reno "))), Some("  Reno ".to_string()));
        assert_eq!(parse_text(Some(&json!("   "))), None);
        assert_eq!(parse_text(Some(&json!(null))), None);
        assert_eq!(parse_text(Some(&json!(5))), None);
        assert_eq!(parse_text(None), None);
    }

    #[test]
    fn numbers_from_json_or_strings() {
        assert_eq!(parse_number(Some(&json!(39.5))), Some(39.5));
        assert_eq!(parse_number(Some(&json!("-119.8"))), Some(-119.8));
        assert_eq!(parse_number(Some(&json!("abc"))), None);
        assert_eq!(parse_number(Some(&json!("NaN"))), None);
        assert_eq!(parse_number(Some(&json!(true))), None);
    }

    #[test]
    fn out_of_range_coordinates_still_parse() {
        assert_eq!(parse_number(Some(&json!(200.0))), Some(200.0));
    }

    #[test]
    fn bools_from_json_or_strings() {
        assert_eq!(parse_bool(Some(&json!(true))), Some(true));
        assert_eq!(parse_bool(Some(&json!("True"))), Some(true));
        assert_eq!(parse_bool(Some(&json!("FALSE"))), Some(false));
        assert_eq!(parse_bool(Some(&json!("yes"))), None);
        assert_eq!(parse_bool(Some(&json!(1))), None);
    }

    #[test]
    fn dates() {
        let expected = NaiveDate::from_ymd_opt(2015, 1, 2);
        assert_eq!(parse_date(Some(&json!("2015-01-02"))), expected);
        assert_eq!(parse_date(Some(&json!("2015-01-02T10:00:00"))), expected);
        assert_eq!(parse_date(Some(&json!("2015-01-02T10:00:00.000"))), expected);
        assert_eq!(parse_date(Some(&json!("01/02/2015"))), None);
    }

    #[test]
    fn ids() {
        assert_eq!(parse_id(Some(&json!("A-1"))), Some("A-1".to_string()));
        assert_eq!(parse_id(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(parse_id(Some(&json!(42.0))), Some("42".to_string()));
        assert_eq!(parse_id(Some(&json!(4.5))), None);
        assert_eq!(parse_id(Some(&json!(-1))), None);
        assert_eq!(parse_id(Some(&json!(""))), None);
        assert_eq!(parse_id(Some(&json!(null))), None);
        assert_eq!(parse_id(Some(&json!(true))), None);
        assert_eq!(parse_id(Some(&json!([1]))), None);
        assert_eq!(parse_id(Some(&json!({"id": 1}))), None);
        assert_eq!(parse_id(None), None);
    }
}
