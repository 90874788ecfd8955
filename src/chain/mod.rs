//! Ledger interaction: request descriptors, typed arguments, the
//! `ChainGateway` seam, and the HTTP access-node implementation.
//!
//! Operations are named strings resolved by the gateway's own registry; the
//! SDK only supplies imports, signer roles, and typed arguments, and receives
//! back raw call data (query) or a submission receipt (mutation).

pub mod argument;
pub mod gateway;
pub mod wire;

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod retry;

use crate::chain::argument::Argument;
use crate::shared::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Roles ───────────────────────────────────────────────────────────────────

/// Signer roles for an operation.
///
/// The proposer must resolve to a signer known to the gateway; each
/// authorizer likewise. Resolution happens gateway-side — an unknown signer
/// comes back as a `GatewayError`, not a local check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposer: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorizers: Vec<Address>,
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// The descriptor sent with every query or mutation: named contract imports,
/// signer roles, and typed argument bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub imports: BTreeMap<String, Address>,
    #[serde(default)]
    pub roles: Roles,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a named contract import to an account address.
    pub fn import(mut self, name: impl Into<String>, address: Address) -> Self {
        self.imports.insert(name.into(), address);
        self
    }

    pub fn proposer(mut self, address: Address) -> Self {
        self.roles.proposer = Some(address);
        self
    }

    pub fn authorizer(mut self, address: Address) -> Self {
        self.roles.authorizers.push(address);
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }
}
