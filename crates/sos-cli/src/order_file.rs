//! The order-file input format: the serialized form state of one service
//! order, replayed through the ledger on load so every derived value is
//! recomputed rather than trusted from the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use sos_model::OrderHeader;

/// One service order as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDocument {
    pub header: OrderHeader,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// One part/service row as authored in the order file. Totals are absent by
/// design: they are derived by the ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    #[serde(default = "default_quantity", deserialize_with = "coerce_f64")]
    pub quantity: f64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "coerce_f64")]
    pub unit_price: f64,
    #[serde(default)]
    pub confirmed: bool,
}

fn default_quantity() -> f64 {
    1.0
}

/// Load and parse an order file.
pub fn load_order(path: &Path) -> Result<OrderDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read order file {}", path.display()))?;
    let order: OrderDocument = serde_json::from_str(&raw)
        .with_context(|| format!("parse order file {}", path.display()))?;
    Ok(order)
}

/// Accept numbers written either as JSON numbers or as numeric strings,
/// matching the form's loose field coercion.
fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            // "nan" and "inf" parse successfully but are never valid amounts
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(serde::de::Error::custom(format!(
                    "invalid number: {text:?}"
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_accept_string_numbers() {
        let entry: ItemEntry = serde_json::from_str(
            r#"{"quantity": "2", "description": "troca de óleo", "unit_price": "10.00"}"#,
        )
        .expect("parse item entry");
        assert_eq!(entry.quantity, 2.0);
        assert_eq!(entry.unit_price, 10.0);
        assert!(!entry.confirmed);
    }

    #[test]
    fn non_finite_string_numbers_are_rejected() {
        for raw in [
            r#"{"quantity": "nan", "description": "x"}"#,
            r#"{"description": "x", "unit_price": "inf"}"#,
        ] {
            assert!(serde_json::from_str::<ItemEntry>(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn quantity_defaults_to_one() {
        let entry: ItemEntry =
            serde_json::from_str(r#"{"description": "x"}"#).expect("parse item entry");
        assert_eq!(entry.quantity, 1.0);
        assert_eq!(entry.unit_price, 0.0);
    }
}
