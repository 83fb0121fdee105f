//! Serde helpers for the persisted document.

/// `Decimal` written as a JSON number, read from a number or a string.
///
/// The state file and backups store money and hours as plain numbers.
/// Reading still accepts the string form so hand-edited files keep loading.
pub mod decimal_number {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Decimal, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(value, s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Amount {
        #[serde(with = "super::decimal_number")]
        value: Decimal,
    }

    #[test]
    fn test_writes_a_json_number() {
        let json = serde_json::to_value(Amount {
            value: Decimal::new(9675, 2),
        })
        .unwrap();
        assert_eq!(json["value"], serde_json::json!(96.75));
    }

    #[test]
    fn test_reads_numbers_and_strings() {
        let from_number: Amount = serde_json::from_str(r#"{"value": 12.5}"#).unwrap();
        let from_string: Amount = serde_json::from_str(r#"{"value": "12.50"}"#).unwrap();
        assert_eq!(from_number.value, Decimal::new(125, 1));
        assert_eq!(from_string.value, Decimal::new(125, 1));
    }
}
