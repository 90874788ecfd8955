//! Typed argument bindings for ledger operations.
//!
//! Each argument travels as a `{ "type": …, "value": … }` pair matching the
//! ledger's type system. Integers encode their value as a decimal string;
//! arrays nest one pair per element. The SDK never validates a binding
//! against its value — a mismatch is the gateway's to reject.

use crate::shared::Address;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// A typed operation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    String(String),
    Address(Address),
    Bool(bool),
    UInt64(u64),
    StringArray(Vec<String>),
    UInt64Array(Vec<u64>),
}

impl Argument {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn address(a: &Address) -> Self {
        Self::Address(a.clone())
    }

    pub fn string_array(items: impl IntoIterator<Item = String>) -> Self {
        Self::StringArray(items.into_iter().collect())
    }

    pub fn uint64_array(items: impl IntoIterator<Item = u64>) -> Self {
        Self::UInt64Array(items.into_iter().collect())
    }

    /// The `{type, value}` wire encoding.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => json!({ "type": "String", "value": s }),
            Self::Address(a) => json!({ "type": "Address", "value": a.prefixed() }),
            Self::Bool(b) => json!({ "type": "Bool", "value": b }),
            Self::UInt64(n) => json!({ "type": "UInt64", "value": n.to_string() }),
            Self::StringArray(items) => json!({
                "type": "Array",
                "value": items
                    .iter()
                    .map(|s| json!({ "type": "String", "value": s }))
                    .collect::<Vec<_>>(),
            }),
            Self::UInt64Array(items) => json!({
                "type": "Array",
                "value": items
                    .iter()
                    .map(|n| json!({ "type": "UInt64", "value": n.to_string() }))
                    .collect::<Vec<_>>(),
            }),
        }
    }
}

impl Serialize for Argument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_encodings() {
        assert_eq!(
            Argument::string("hello").to_value(),
            json!({ "type": "String", "value": "hello" })
        );
        assert_eq!(
            Argument::Address(Address::new("0x01cf0e2f2f715450")).to_value(),
            json!({ "type": "Address", "value": "0x01cf0e2f2f715450" })
        );
        assert_eq!(
            Argument::Bool(true).to_value(),
            json!({ "type": "Bool", "value": true })
        );
    }

    #[test]
    fn test_uint64_encodes_as_string() {
        assert_eq!(
            Argument::UInt64(18_446_744_073_709_551_615).to_value(),
            json!({ "type": "UInt64", "value": "18446744073709551615" })
        );
    }

    #[test]
    fn test_string_array_nests_pairs() {
        let arg = Argument::string_array(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            arg.to_value(),
            json!({
                "type": "Array",
                "value": [
                    { "type": "String", "value": "a" },
                    { "type": "String", "value": "b" },
                ],
            })
        );
    }

    #[test]
    fn test_uint64_array_nests_pairs() {
        let arg = Argument::uint64_array(vec![0, 3]);
        assert_eq!(
            arg.to_value(),
            json!({
                "type": "Array",
                "value": [
                    { "type": "UInt64", "value": "0" },
                    { "type": "UInt64", "value": "3" },
                ],
            })
        );
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let arg = Argument::uint64_array(vec![7]);
        assert_eq!(serde_json::to_value(&arg).unwrap(), arg.to_value());
    }
}
