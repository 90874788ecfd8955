//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// A chain or content-store call failed — network, consensus, or validation
/// failure from the external system. Never retried or recovered locally
/// beyond the configured HTTP retry policy; propagates to the caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unknown signer: {0}")]
    UnknownSigner(String),

    /// The ledger rejected the operation: a script that failed to execute,
    /// an argument whose declared type did not match its value, or a
    /// transaction that sealed with an execution error.
    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Transaction {transaction_id} not sealed after {waited_ms}ms (status: {status})")]
    SealTimeout {
        transaction_id: String,
        status: String,
        waited_ms: u64,
    },

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Malformed multihash input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid base-58 string: {0}")]
    Base58(String),

    #[error("Multihash too short: {len} bytes (need at least 2)")]
    TooShort { len: usize },
}

/// An event subscription received an error from the gateway. Rendered into
/// an `error`-typed envelope and handed to the callback; never panics the
/// poller.
#[derive(Error, Debug)]
pub enum EventDeliveryError {
    #[error("Event poll failed for {event}: {source}")]
    Poll {
        event: String,
        #[source]
        source: GatewayError,
    },

    #[error("Event payload for {event} was not an object")]
    NonObjectPayload { event: String },
}
