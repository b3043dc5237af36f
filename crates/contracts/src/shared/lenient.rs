//! Tolerant deserializers for inventory payloads.
//!
//! The inventory endpoints are not consistent about value types: the same
//! field arrives as a JSON number on one endpoint and as a numeric string on
//! another (`"mrp": "499.00"`), SKUs are sometimes numbers, and a few fields
//! that used to be scalars became objects in later versions. Every field that
//! goes through these helpers degrades to `None` instead of failing the whole
//! response.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Scalar::Int(n) => *n as f64,
            Scalar::Float(n) => *n,
            Scalar::Text(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
            Scalar::Bool(_) | Scalar::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(n) if n.is_finite() => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Number or numeric string → `f64`. Anything else → `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}

/// Same as [`opt_f64`], truncated toward zero like the dashboard's unit counts.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()).map(|n| n.trunc() as i64))
}

/// Non-negative integer (page numbers, totals). Negative values → `None`.
pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| v.as_f64())
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc() as u64))
}

/// String or number → non-empty `String`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(Scalar::into_text))
}

/// `true`/`false`, `0`/`1`, `"yes"`/`"no"`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        Scalar::Bool(b) => Some(b),
        Scalar::Int(n) => Some(n != 0),
        Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "opt_i64")]
        units: Option<i64>,
        #[serde(default, deserialize_with = "opt_string")]
        sku: Option<String>,
        #[serde(default, deserialize_with = "opt_bool")]
        flag: Option<bool>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(probe(r#"{"price": 12.5}"#).price, Some(12.5));
        assert_eq!(probe(r#"{"price": "499.00"}"#).price, Some(499.0));
        assert_eq!(probe(r#"{"price": "1,250.75"}"#).price, Some(1250.75));
        assert_eq!(probe(r#"{"price": 7}"#).price, Some(7.0));
    }

    #[test]
    fn test_garbage_degrades_to_none() {
        assert_eq!(probe(r#"{"price": "n/a"}"#).price, None);
        assert_eq!(probe(r#"{"price": null}"#).price, None);
        assert_eq!(probe(r#"{"price": {"value": "1,500", "days": "7d"}}"#).price, None);
        assert_eq!(probe(r#"{}"#).price, None);
    }

    #[test]
    fn test_units_truncate() {
        assert_eq!(probe(r#"{"units": "12"}"#).units, Some(12));
        assert_eq!(probe(r#"{"units": 9.9}"#).units, Some(9));
    }

    #[test]
    fn test_sku_may_be_numeric() {
        assert_eq!(
            probe(r#"{"sku": 100000661934}"#).sku.as_deref(),
            Some("100000661934")
        );
        assert_eq!(probe(r#"{"sku": "  "}"#).sku, None);
    }

    #[test]
    fn test_bool_variants() {
        assert_eq!(probe(r#"{"flag": 1}"#).flag, Some(true));
        assert_eq!(probe(r#"{"flag": "no"}"#).flag, Some(false));
        assert_eq!(probe(r#"{"flag": "maybe"}"#).flag, None);
    }
}
