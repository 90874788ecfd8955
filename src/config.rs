//! Static configuration — endpoints, account directory, store connection.
//!
//! A `Config` is a plain value handed to the client at construction and never
//! mutated at runtime. Test setups build their own value (`Config::for_testing`)
//! instead of patching shared state.

use crate::network::{DEFAULT_ACCESS_URL, DEFAULT_STORE_HOST, DEFAULT_STORE_PORT};
use crate::shared::{Address, ContentId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level SDK configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chain: ChainConfig,
    pub store: StoreConfig,
    pub accounts: AccountDirectory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain: ChainConfig::default(),
            store: StoreConfig::default(),
            accounts: AccountDirectory::default(),
        }
    }
}

impl Config {
    /// Build a configuration from a flat account list, the way test
    /// bootstraps lay accounts out: first is the owner, the next three are
    /// admins, the rest are users.
    pub fn for_testing(accounts: &[Address]) -> Self {
        let owner = accounts.first().cloned().unwrap_or_default();
        let admins = accounts.iter().skip(1).take(3).cloned().collect();
        let users = accounts.iter().skip(4).cloned().collect();
        Self {
            accounts: AccountDirectory {
                owner,
                admins,
                users,
            },
            ..Self::default()
        }
    }
}

// ─── ChainConfig ─────────────────────────────────────────────────────────────

/// Ledger access node connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Access node REST base URL.
    pub access_url: String,
    /// How long to wait for a submitted transaction to seal.
    #[serde(with = "duration_ms", default = "default_seal_timeout")]
    pub seal_timeout: Duration,
    /// Interval between seal-status polls.
    #[serde(with = "duration_ms", default = "default_poll_interval")]
    pub poll_interval: Duration,
}

fn default_seal_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            access_url: DEFAULT_ACCESS_URL.to_string(),
            seal_timeout: default_seal_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

// ─── StoreConfig ─────────────────────────────────────────────────────────────

/// Content store connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            host: DEFAULT_STORE_HOST.to_string(),
            port: DEFAULT_STORE_PORT,
        }
    }
}

impl StoreConfig {
    /// Base URL of the store's HTTP API.
    pub fn api_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    /// Public gateway URL for a stored object.
    pub fn public_url(&self, cid: &ContentId) -> String {
        format!("{}://{}/ipfs/{}", self.protocol, self.host, cid)
    }
}

// ─── AccountDirectory ────────────────────────────────────────────────────────

/// The accounts the dapp was bootstrapped with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountDirectory {
    pub owner: Address,
    pub admins: Vec<Address>,
    pub users: Vec<Address>,
}

impl AccountDirectory {
    /// All accounts, owner first.
    pub fn all(&self) -> Vec<Address> {
        let mut out = Vec::with_capacity(1 + self.admins.len() + self.users.len());
        out.push(self.owner.clone());
        out.extend(self.admins.iter().cloned());
        out.extend(self.users.iter().cloned());
        out
    }
}

/// Serializes a `Duration` as integer milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}
