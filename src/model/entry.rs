//! Enumeration output types.

use crate::model::Order;
use serde::{Deserialize, Serialize};

/// A stored value as seen by the enumeration scan.
///
/// Values that do not decode as an [`Order`] are kept verbatim instead of
/// failing the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Decoded(Order),
    Raw(String),
}

impl RecordValue {
    /// Decodes `bytes` as an order, falling back to the raw text.
    pub fn decode(bytes: &[u8]) -> (Self, Option<serde_json::Error>) {
        match Order::from_slice(bytes) {
            Ok(order) => (RecordValue::Decoded(order), None),
            Err(e) => (
                RecordValue::Raw(String::from_utf8_lossy(bytes).into_owned()),
                Some(e),
            ),
        }
    }

    pub fn as_order(&self) -> Option<&Order> {
        match self {
            RecordValue::Decoded(order) => Some(order),
            RecordValue::Raw(_) => None,
        }
    }
}

/// One `{ "Key": ..., "Record": ... }` pair produced by `GetAllOrders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: RecordValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undecodable_value_is_kept_raw() {
        let (value, error) = RecordValue::decode(b"not json at all");
        assert_eq!(value, RecordValue::Raw("not json at all".into()));
        assert!(error.is_some());
        assert!(value.as_order().is_none());
    }

    #[test]
    fn test_json_that_is_not_an_order_is_raw() {
        let (value, error) = RecordValue::decode(br#"{"colour":"blue"}"#);
        assert_eq!(value, RecordValue::Raw(r#"{"colour":"blue"}"#.into()));
        assert!(error.is_some());
    }

    #[test]
    fn test_entry_shape() {
        let entry = OrderEntry {
            key: "k1".into(),
            record: RecordValue::Raw("plain".into()),
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"Key":"k1","Record":"plain"}"#
        );
    }
}
