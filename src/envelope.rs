//! The uniform result envelope returned by every dispatcher operation.
//!
//! An envelope is created fresh on every call, is immutable once built, and
//! carries no identity across calls. The presentation layer consumes it by
//! matching on `kind`; the closed `Formatter` enum replaces the legacy
//! string-keyed formatter lookup so every formatter kind is statically known.

use crate::shared::fmt::{condensed, group_digits};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ─── EnvelopeKind ────────────────────────────────────────────────────────────

/// The closed set of envelope payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeKind {
    #[serde(rename = "tx-hash")]
    TxHash,
    #[serde(rename = "account")]
    Account,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "big-number")]
    BigNumber,
    #[serde(rename = "ipfs-hash-array")]
    IpfsHashArray,
    #[serde(rename = "sia-hash-array")]
    SiaHashArray,
}

impl EnvelopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TxHash => "tx-hash",
            Self::Account => "account",
            Self::Array => "array",
            Self::Object => "object",
            Self::Error => "error",
            Self::BigNumber => "big-number",
            Self::IpfsHashArray => "ipfs-hash-array",
            Self::SiaHashArray => "sia-hash-array",
        }
    }
}

impl std::fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Formatter ───────────────────────────────────────────────────────────────

/// A display formatter hint attached to array envelopes.
///
/// Round-trips through the legacy wire tokens (`"Text"`, `"Text-20-5"`,
/// `"TxHash"`, …) for compatibility with existing presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formatter {
    /// Verbatim text.
    Text,
    /// Text condensed to `begin` leading and `end` trailing characters.
    Condensed { begin: usize, end: usize },
    TxHash,
    Account,
    IpfsHash,
    SiaHash,
    Number,
    Boolean,
    Strong,
    Plain,
}

impl Formatter {
    /// The wire token for this formatter.
    pub fn token(&self) -> String {
        match self {
            Self::Text => "Text".to_string(),
            Self::Condensed { begin, end: 0 } => format!("Text-{}", begin),
            Self::Condensed { begin, end } => format!("Text-{}-{}", begin, end),
            Self::TxHash => "TxHash".to_string(),
            Self::Account => "Account".to_string(),
            Self::IpfsHash => "IpfsHash".to_string(),
            Self::SiaHash => "SiaHash".to_string(),
            Self::Number => "Number".to_string(),
            Self::Boolean => "Boolean".to_string(),
            Self::Strong => "Strong".to_string(),
            Self::Plain => "Plain".to_string(),
        }
    }

    /// Parse a wire token. `Text-20-5` carries condensation bounds.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "Text" => return Some(Self::Text),
            "TxHash" => return Some(Self::TxHash),
            "Account" => return Some(Self::Account),
            "IpfsHash" => return Some(Self::IpfsHash),
            "SiaHash" => return Some(Self::SiaHash),
            "Number" => return Some(Self::Number),
            "Boolean" => return Some(Self::Boolean),
            "Strong" => return Some(Self::Strong),
            "Plain" => return Some(Self::Plain),
            _ => {}
        }
        let mut frags = s.split('-');
        if frags.next() != Some("Text") {
            return None;
        }
        let begin: usize = frags.next()?.parse().ok()?;
        let end: usize = match frags.next() {
            Some(e) => e.parse().ok()?,
            None => 0,
        };
        if frags.next().is_some() {
            return None;
        }
        Some(Self::Condensed { begin, end })
    }

    /// Render a value as plain text. Markup stays in the presentation layer.
    pub fn apply(&self, s: &str) -> String {
        match self {
            Self::Text | Self::Strong | Self::Plain => s.to_string(),
            Self::Condensed { begin, end } => condensed(s, *begin, *end),
            Self::TxHash | Self::Account | Self::IpfsHash | Self::SiaHash => condensed(s, 6, 4),
            Self::Number => group_digits(s),
            Self::Boolean => {
                if s.eq_ignore_ascii_case("true") || s == "1" {
                    "YES".to_string()
                } else {
                    "NO".to_string()
                }
            }
        }
    }
}

impl std::fmt::Display for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl Serialize for Formatter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Formatter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Formatter::from_token(&s)
            .ok_or_else(|| D::Error::custom(format!("unknown formatter token: {}", s)))
    }
}

// ─── ResultEnvelope ──────────────────────────────────────────────────────────

/// The uniform wrapper around every operation's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
    pub label: String,
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<Vec<Formatter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Set on envelopes delivered through an event subscription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl ResultEnvelope {
    pub fn new(kind: EnvelopeKind, label: impl Into<String>, result: Value) -> Self {
        Self {
            kind,
            label: label.into(),
            result,
            formatter: None,
            hint: None,
            event: None,
        }
    }

    /// A successful transaction submission. `result` is the transaction id.
    pub fn tx_hash(transaction_id: impl Into<String>) -> Self {
        Self::new(
            EnvelopeKind::TxHash,
            "Transaction Hash",
            Value::String(transaction_id.into()),
        )
    }

    /// A query returning a sequence. `null`/missing call data becomes `[]`.
    pub fn array(label: impl Into<String>, result: Value) -> Self {
        let result = match result {
            Value::Null => Value::Array(Vec::new()),
            other => other,
        };
        Self::new(EnvelopeKind::Array, label, result)
    }

    /// A query returning a keyed structure.
    pub fn object(label: impl Into<String>, result: Value) -> Self {
        Self::new(EnvelopeKind::Object, label, result)
    }

    pub fn account(label: impl Into<String>, result: Value) -> Self {
        Self::new(EnvelopeKind::Account, label, result)
    }

    pub fn big_number(label: impl Into<String>, value: Decimal) -> Self {
        Self::new(
            EnvelopeKind::BigNumber,
            label,
            Value::String(value.to_string()),
        )
    }

    /// A failure surfaced to the presentation layer.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new(
            EnvelopeKind::Error,
            "Error Message",
            Value::String(message.to_string()),
        )
    }

    pub fn with_formatter(mut self, formatter: Vec<Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// The formatters to apply; arrays lacking one fall back to `[Text]`.
    pub fn formatters(&self) -> Vec<Formatter> {
        self.formatter
            .clone()
            .unwrap_or_else(|| vec![Formatter::Text])
    }

    pub fn is_error(&self) -> bool {
        self.kind == EnvelopeKind::Error
    }
}
