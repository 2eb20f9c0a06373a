//! Lenient deserializers for form input
//!
//! Numeric form entries arrive as numbers or as strings. A malformed entry is
//! coerced to zero instead of failing the whole draft; range checks happen
//! later in contract validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a numeric value the way a form field would: trimmed, malformed -> 0
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

pub fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = coerce_number(&value).round();
    Ok(n.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

/// Optional date where an empty string means "not set"
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Optional free text where an empty string means "not set"
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "number")]
        amount: f64,
        #[serde(deserialize_with = "integer")]
        percent: i32,
        #[serde(default, deserialize_with = "optional_date")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let form: Form =
            serde_json::from_value(json!({"amount": "abc", "percent": "", "date": ""})).unwrap();
        assert_eq!(form.amount, 0.0);
        assert_eq!(form.percent, 0);
        assert_eq!(form.date, None);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let form: Form = serde_json::from_value(
            json!({"amount": " 1500000.50 ", "percent": "45", "date": "2025-03-01"}),
        )
        .unwrap();
        assert_eq!(form.amount, 1_500_000.5);
        assert_eq!(form.percent, 45);
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_null_number_is_zero() {
        let form: Form = serde_json::from_value(json!({"amount": null, "percent": 12.6})).unwrap();
        assert_eq!(form.amount, 0.0);
        assert_eq!(form.percent, 13);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result: Result<Form, _> =
            serde_json::from_value(json!({"amount": 1, "percent": 1, "date": "March 1"}));
        assert!(result.is_err());
    }
}
