//! Lenient field decoders.
//!
//! The backend is not strict about number encoding: the same field can be a
//! JSON number, a numeric string or null depending on the endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub fn de_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number_from_value))
}

/// Missing, null or garbage becomes 0.0.
pub fn de_f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(de_opt_f64(deserializer)?.unwrap_or(0.0))
}

pub fn de_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

/// Ids arrive as numbers or strings; anything else is an error.
pub fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    de_opt_i64(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing or invalid id"))
}

pub fn de_string_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Text field the backend may send under two keys; the first non-empty wins.
pub fn or_nonempty(primary: String, fallback: String) -> String {
    if primary.trim().is_empty() {
        fallback
    } else {
        primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "de_id")]
        id: i64,
        #[serde(default, deserialize_with = "de_opt_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "de_f64_or_zero")]
        fee: f64,
        #[serde(default, deserialize_with = "de_string_or_default")]
        code: String,
    }

    #[test]
    fn test_lenient_numbers() {
        let row: Row =
            serde_json::from_str(r#"{"id":"12","amount":"1,500.5","fee":null,"code":42}"#).unwrap();
        assert_eq!(row.id, 12);
        assert_eq!(row.amount, Some(1500.5));
        assert_eq!(row.fee, 0.0);
        assert_eq!(row.code, "42");
    }

    #[test]
    fn test_missing_fields_default() {
        let row: Row = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.fee, 0.0);
        assert_eq!(row.code, "");
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"id":"abc"}"#).is_err());
    }

    #[test]
    fn test_or_nonempty() {
        assert_eq!(or_nonempty("KC Braga".into(), "x".into()), "KC Braga");
        assert_eq!(or_nonempty(" ".into(), "KC Braga".into()), "KC Braga");
    }
}
