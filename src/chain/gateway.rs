//! The `ChainGateway` seam.
//!
//! Everything the dispatcher needs from a ledger, behind one trait: the HTTP
//! access-node client implements it for production, test doubles implement it
//! for dispatch tests. Futures are required to be `Send` so subscriptions can
//! poll from a background task.

use crate::chain::wire::{AccountResponse, EventsPage, TxReceipt};
use crate::chain::Request;
use crate::error::GatewayError;
use crate::shared::Address;
use serde_json::Value;
use std::future::Future;

/// Executes read queries and submits signed transactions against a ledger.
pub trait ChainGateway: Send + Sync {
    /// Look up an account's address, balance, and keys.
    fn get_account(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<AccountResponse, GatewayError>> + Send;

    /// Run a read-only operation. Returns whatever raw call data the ledger
    /// produced (array or object); no state change.
    fn query(
        &self,
        request: &Request,
        operation: &str,
    ) -> impl Future<Output = Result<Value, GatewayError>> + Send;

    /// Sign and submit a mutation, then wait until the transaction is sealed.
    ///
    /// A transaction sealing with an execution error is a
    /// [`GatewayError::Execution`]; one that never seals within the configured
    /// window is a [`GatewayError::SealTimeout`].
    fn submit(
        &self,
        request: &Request,
        operation: &str,
    ) -> impl Future<Output = Result<TxReceipt, GatewayError>> + Send;

    /// Fetch events of a fully qualified type from a height cursor.
    /// `from_height == 0` means "from the gateway's current cursor".
    fn events(
        &self,
        event_type: &str,
        from_height: u64,
    ) -> impl Future<Output = Result<EventsPage, GatewayError>> + Send;
}
