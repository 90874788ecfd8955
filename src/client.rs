//! High-level client — `TallyClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the configuration, and the accessor
//! methods. The client is generic over its gateway seams so dispatch tests
//! run against in-memory doubles.

use crate::chain::gateway::ChainGateway;
use crate::config::{AccountDirectory, Config};
use crate::domain::ballot::client::Ballots;
use crate::domain::nft::client::Nft;
use crate::error::SdkError;
use crate::store::{AddedFile, ContentStore, FileSource, ProgressFn, UploadOptions};

// Re-export sub-client types for convenience.
pub use crate::domain::ballot::client::Ballots as BallotsClient;
pub use crate::domain::nft::client::Nft as NftClient;

#[cfg(feature = "http")]
use crate::chain::http::HttpChainGateway;
#[cfg(feature = "http")]
use crate::store::http::IpfsHttpStore;

/// The primary entry point for the Tally SDK.
///
/// Holds the configuration and both gateway implementations; every
/// dispatcher invocation is otherwise stateless and independent.
pub struct TallyClient<G, S> {
    config: Config,
    gateway: G,
    store: S,
}

impl<G: ChainGateway, S: ContentStore> TallyClient<G, S> {
    /// Build a client over explicit gateway implementations. Tests pass
    /// doubles here; production code goes through [`TallyClient::builder`].
    pub fn with_gateways(config: Config, gateway: G, store: S) -> Self {
        Self {
            config,
            gateway,
            store,
        }
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn nft(&self) -> Nft<'_, G, S> {
        Nft { client: self }
    }

    pub fn ballots(&self) -> Ballots<'_, G, S> {
        Ballots { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The accounts the dapp was bootstrapped with.
    pub fn account_directory(&self) -> &AccountDirectory {
        &self.config.accounts
    }

    /// Upload files to the content store, pinned. Results arrive in
    /// upload-completion order; an empty batch returns empty without a
    /// store call.
    pub async fn upload(
        &self,
        files: Vec<FileSource>,
        wrap_with_directory: bool,
        progress: Option<ProgressFn>,
    ) -> Result<Vec<AddedFile>, SdkError> {
        let options = UploadOptions {
            wrap_with_directory,
            pin: true,
        };
        Ok(self.store.add(files, options, progress).await?)
    }
}

impl<G: Clone, S: Clone> Clone for TallyClient<G, S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            gateway: self.gateway.clone(),
            store: self.store.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
impl TallyClient<HttpChainGateway, IpfsHttpStore> {
    pub fn builder() -> TallyClientBuilder {
        TallyClientBuilder::default()
    }
}

/// Builder for the HTTP-backed client.
#[cfg(feature = "http")]
#[derive(Default)]
pub struct TallyClientBuilder {
    config: Config,
}

#[cfg(feature = "http")]
impl TallyClientBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Override just the access node URL.
    pub fn access_url(mut self, url: &str) -> Self {
        self.config.chain.access_url = url.to_string();
        self
    }

    pub fn build(self) -> Result<TallyClient<HttpChainGateway, IpfsHttpStore>, SdkError> {
        let gateway = HttpChainGateway::new(&self.config.chain)?;
        let store = IpfsHttpStore::new(&self.config.store)?;
        Ok(TallyClient::with_gateways(self.config, gateway, store))
    }
}
