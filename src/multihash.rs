//! Base-58 multihash decomposition.
//!
//! A multihash is self-describing: the first byte names the hash function,
//! the second the digest length, and the rest is the digest itself.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// A decomposed multihash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multihash {
    /// `0x`-prefixed hex encoding of the digest bytes.
    pub digest: String,
    /// Hash function identifier (e.g. `0x12` for sha2-256).
    #[serde(rename = "hashFunction")]
    pub hash_function: u8,
    /// Declared digest length in bytes.
    #[serde(rename = "digestLength")]
    pub digest_length: u8,
}

/// Decode a base-58 multihash string into its parts.
///
/// The decoded byte sequence must carry at least the two header bytes.
pub fn decode(multihash: &str) -> Result<Multihash, DecodeError> {
    let decoded = bs58::decode(multihash)
        .into_vec()
        .map_err(|e| DecodeError::Base58(e.to_string()))?;

    if decoded.len() < 2 {
        return Err(DecodeError::TooShort { len: decoded.len() });
    }

    Ok(Multihash {
        digest: format!("0x{}", hex::encode(&decoded[2..])),
        hash_function: decoded[0],
        digest_length: decoded[1],
    })
}
