//! Basic NFT domain — account bootstrap, minted-ID queries, account info.

pub mod client;

use crate::chain::wire::AccountResponse;
use serde_json::{Map, Value};

/// Mutation establishing the dapp state resource on an account.
pub const OP_INITIALIZE_ACCOUNT: &str = "basic_nft_initializeAccount";

/// Query returning the IDs minted under an account.
pub const OP_GET_IDS: &str = "basic_nft_getIDs";

/// Emitted once an account's dapp state is initialized.
pub const EVENT_INITIALIZE_ACCOUNT: &str = "DappState.InitializeAccount";

/// Flatten an account lookup into the object payload the presentation layer
/// expects: address and balance merged with the fields of the first key.
pub fn account_summary(resp: &AccountResponse) -> Value {
    let mut summary = Map::new();
    summary.insert(
        "address".to_string(),
        Value::String(resp.address.to_string()),
    );
    summary.insert(
        "balance".to_string(),
        Value::String(resp.balance.to_string()),
    );
    if let Some(key) = resp.keys.first() {
        if let Ok(Value::Object(fields)) = serde_json::to_value(key) {
            summary.extend(fields);
        }
    }
    Value::Object(summary)
}
