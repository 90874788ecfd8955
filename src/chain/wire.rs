//! Wire types for the access-node REST API.

use crate::shared::Address;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Accounts ────────────────────────────────────────────────────────────────

/// A key registered on an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountKey {
    pub index: u32,
    pub public_key: String,
    pub weight: u32,
    #[serde(default)]
    pub revoked: bool,
}

/// REST response for an account lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub address: Address,
    pub balance: Decimal,
    #[serde(default)]
    pub keys: Vec<AccountKey>,
}

// ─── Transactions ────────────────────────────────────────────────────────────

/// Lifecycle status of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Finalized => "finalized",
            Self::Executed => "executed",
            Self::Sealed => "sealed",
            Self::Expired => "expired",
        }
    }

    /// Whether the ledger will never advance this transaction further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sealed | Self::Expired)
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// REST response for a transaction submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub transaction_id: String,
}

/// REST response for a transaction result poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResultResponse {
    pub status: TxStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// A sequenced transaction, returned once it seals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_id: String,
    pub status: TxStatus,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// A raw event as delivered by the access node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub transaction_id: String,
    pub height: u64,
    #[serde(default)]
    pub block_timestamp: Option<DateTime<Utc>>,
    pub payload: Value,
}

/// One page of events plus the cursor to resume from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub events: Vec<RawEvent>,
    /// First height not yet covered by this page.
    pub next_height: u64,
}
