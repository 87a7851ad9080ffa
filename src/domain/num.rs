//! Raw decimal text as reported by the venue.
//!
//! The venue sends most numbers as JSON strings but some (leverage, ids)
//! as JSON numbers. Both are kept as text so a value that fails to parse
//! can still be shown verbatim.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse decimal text, accepting plain and scientific notation.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Deserialize a string-or-number field into its text form.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

/// Deserialize a nullable string-or-number field into its text form.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_scientific() {
        assert_eq!(parse_decimal("100.5"), Some(dec!(100.5)));
        assert_eq!(parse_decimal(" -3 "), Some(dec!(-3)));
        assert_eq!(parse_decimal("1e3"), Some(dec!(1000)));
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "text")]
        a: String,
        #[serde(default, deserialize_with = "optional_text")]
        b: Option<String>,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"a": 20, "b": "1.5"}"#).unwrap();
        assert_eq!(p.a, "20");
        assert_eq!(p.b.as_deref(), Some("1.5"));

        let p: Probe = serde_json::from_str(r#"{"a": "x", "b": null}"#).unwrap();
        assert_eq!(p.a, "x");
        assert!(p.b.is_none());

        let p: Probe = serde_json::from_str(r#"{"a": "x"}"#).unwrap();
        assert!(p.b.is_none());
    }
}
