//! Serde helpers for loosely typed backend fields
//!
//! Only ids are strict. Every other scalar a backend may send in the wrong
//! type decodes to `None` so one bad record degrades to default appearance
//! instead of rejecting the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Scalar that arrives as either a JSON string or a JSON number
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

/// Deserialize an opaque identifier that may be numeric or textual
///
/// `42` and `"42"` both become `"42"`.
pub fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Token that may be textual or numeric; anything else reads as absent
pub fn lenient_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Finite number, possibly sent as a numeric string
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_of(&Value::deserialize(deserializer)?))
}

/// Positive whole count (seats); zero, negative or fractional reads as absent
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = number_of(&Value::deserialize(deserializer)?)
        .filter(|n| *n >= 1.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32);
    Ok(count)
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Decode each element on its own, dropping the ones that do not fit `T`
///
/// Returns the decoded records and how many were dropped.
pub fn collect_valid<T: DeserializeOwned>(values: Vec<Value>) -> (Vec<T>, usize) {
    let total = values.len();
    let valid: Vec<T> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    let dropped = total - valid.len();
    (valid, dropped)
}

/// `deserialize_with` form of [`collect_valid`]
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(collect_valid(values).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(deserialize_with = "opaque_id")]
        id: String,
        #[serde(default, deserialize_with = "lenient_token")]
        token: Option<String>,
        #[serde(default, deserialize_with = "lenient_count")]
        seats: Option<u32>,
        #[serde(default, deserialize_with = "lenient_number")]
        x: Option<f64>,
    }

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_opaque_id_accepts_number_and_string() {
        let r = record(r#"{"id": 17}"#);
        assert_eq!(r.id, "17");
        assert!(r.token.is_none());

        let r = record(r#"{"id": "t-17", "token": 2}"#);
        assert_eq!(r.id, "t-17");
        assert_eq!(r.token.as_deref(), Some("2"));
    }

    #[test]
    fn test_non_scalar_token_reads_as_absent() {
        for token in ["null", "true", "[1]", r#"{"k": 1}"#] {
            let r = record(&format!(r#"{{"id": "a", "token": {token}}}"#));
            assert!(r.token.is_none(), "{token}");
        }
    }

    #[test]
    fn test_lenient_count() {
        assert_eq!(record(r#"{"id": 1, "seats": 4}"#).seats, Some(4));
        assert_eq!(record(r#"{"id": 1, "seats": "6"}"#).seats, Some(6));
        for bad in ["-1", "0", "2.5", r#""many""#, "false"] {
            let r = record(&format!(r#"{{"id": 1, "seats": {bad}}}"#));
            assert!(r.seats.is_none(), "{bad}");
        }
    }

    #[test]
    fn test_lenient_number() {
        assert_eq!(record(r#"{"id": 1, "x": "120.5"}"#).x, Some(120.5));
        assert_eq!(record(r#"{"id": 1, "x": 80}"#).x, Some(80.0));
        assert!(record(r#"{"id": 1, "x": "left"}"#).x.is_none());
    }

    #[test]
    fn test_collect_valid_drops_bad_records() {
        let values = serde_json::from_str(r#"[{"id": 1}, {"id": true}, {"code": "no id"}, {"id": "b"}]"#)
            .unwrap();
        let (records, dropped) = collect_valid::<Record>(values);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "b"]);
        assert_eq!(dropped, 2);
    }
}
