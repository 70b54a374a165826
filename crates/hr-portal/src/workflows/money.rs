//! Amount decoding for backends that serialize decimals as strings.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
        Ok(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
        let cleaned: String = value
            .trim()
            .chars()
            .filter(|ch| *ch != ',')
            .collect();
        if cleaned.is_empty() {
            return Ok(0.0);
        }
        cleaned
            .parse::<f64>()
            .map_err(|_| E::custom(format!("'{value}' is not a valid amount")))
    }
}

pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

pub(crate) fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalAmount;

    impl<'de> Visitor<'de> for OptionalAmount {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an optional amount")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            amount(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalAmount)
}

/// Format an amount with two decimals for tables and exports.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::amount")]
        value: f64,
        #[serde(default, deserialize_with = "super::optional_amount")]
        maybe: Option<f64>,
    }

    #[test]
    fn accepts_numbers_and_decimal_strings() {
        let row: Row = serde_json::from_str(r#"{"value": "12,500.75", "maybe": 3}"#).unwrap();
        assert_eq!(row.value, 12500.75);
        assert_eq!(row.maybe, Some(3.0));

        let row: Row = serde_json::from_str(r#"{"value": 42, "maybe": null}"#).unwrap();
        assert_eq!(row.value, 42.0);
        assert_eq!(row.maybe, None);

        let row: Row = serde_json::from_str(r#"{"value": 1.5}"#).unwrap();
        assert_eq!(row.maybe, None);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_str::<Row>(r#"{"value": "abc"}"#).is_err());
    }
}
