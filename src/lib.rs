//! # Tally SDK
//!
//! A Rust client SDK for the Tally voting dapp: read-only ledger queries,
//! signed transaction submission, content-addressed file uploads, and a
//! uniform result envelope consumed by the presentation layer.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Newtypes, multihash codec, result envelope, typed arguments,
//!    configuration (always available)
//! 2. **Gateways** — `ChainGateway` + `ContentStore` traits with HTTP
//!    implementations (`http` feature)
//! 3. **Events** — Polling subscriptions with explicit handles (`events` feature)
//! 4. **High-Level Client** — `TallyClient` with nested domain sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tally_sdk::prelude::*;
//!
//! let client = TallyClient::builder()
//!     .config(Config::default())
//!     .build()?;
//!
//! let info = client.nft().get_account_info("0xf8d6e0586b0a20c7").await?;
//! let proposals = client.ballots().proposal_list(&admin).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display helpers used across all modules.
pub mod shared;

/// Base-58 multihash decomposition.
pub mod multihash;

/// The uniform result envelope returned by every dispatcher operation.
pub mod envelope;

/// Ledger request descriptors, typed arguments, gateway trait + HTTP impl.
pub mod chain;

/// Content-addressed store trait + IPFS HTTP impl.
pub mod store;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Static configuration passed into the client at construction.
pub mod config;

// ── Layer 3: Events ──────────────────────────────────────────────────────────

/// Event subscriptions: polling, payload normalization, handles.
pub mod events;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// Domain modules (vertical slices): one sub-client per dapp feature set.
pub mod domain;

/// `TallyClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, ContentId};

    // Core contracts
    pub use crate::chain::argument::Argument;
    pub use crate::chain::{Request, Roles};
    pub use crate::envelope::{EnvelopeKind, Formatter, ResultEnvelope};
    pub use crate::multihash::{decode, Multihash};

    // Gateway seams
    pub use crate::chain::gateway::ChainGateway;
    pub use crate::chain::wire::{
        AccountKey, AccountResponse, EventsPage, RawEvent, TxReceipt, TxStatus,
    };
    pub use crate::store::{AddedFile, ContentStore, FileSource, UploadOptions};

    // HTTP implementations
    #[cfg(feature = "http")]
    pub use crate::chain::http::HttpChainGateway;
    #[cfg(feature = "http")]
    pub use crate::chain::retry::{RetryConfig, RetryPolicy};
    #[cfg(feature = "http")]
    pub use crate::store::http::IpfsHttpStore;

    // Errors
    pub use crate::error::{DecodeError, EventDeliveryError, GatewayError, SdkError};

    // Configuration + network
    pub use crate::config::{AccountDirectory, ChainConfig, Config, StoreConfig};
    pub use crate::network::{DEFAULT_ACCESS_URL, DEFAULT_STORE_HOST};

    // Events
    #[cfg(feature = "events")]
    pub use crate::events::Subscription;

    // High-level client
    #[cfg(feature = "http")]
    pub use crate::client::TallyClientBuilder;
    pub use crate::client::{BallotsClient, NftClient, TallyClient};
}
