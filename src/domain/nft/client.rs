//! NFT sub-client — account bootstrap and minted-ID queries.

use crate::chain::argument::Argument;
use crate::chain::gateway::ChainGateway;
use crate::chain::Request;
use crate::client::TallyClient;
use crate::domain::nft::{account_summary, OP_GET_IDS, OP_INITIALIZE_ACCOUNT};
use crate::envelope::ResultEnvelope;
use crate::error::SdkError;
use crate::shared::Address;
use crate::store::ContentStore;

pub struct Nft<'a, G, S> {
    pub(crate) client: &'a TallyClient<G, S>,
}

impl<'a, G: ChainGateway, S: ContentStore> Nft<'a, G, S> {
    /// Account address, balance, and first-key details as an `object`
    /// envelope. A leading `0x` on the input is accepted.
    pub async fn get_account_info(&self, account: &str) -> Result<ResultEnvelope, SdkError> {
        let address = Address::new(account);
        let resp = self.client.gateway().get_account(&address).await?;
        Ok(ResultEnvelope::object(
            "Account Information",
            account_summary(&resp),
        ))
    }

    /// Establish the dapp state resource on `account`. Returns a `tx-hash`
    /// envelope carrying the transaction id.
    pub async fn initialize_account(&self, account: &Address) -> Result<ResultEnvelope, SdkError> {
        let request = Request::new()
            .import("DappState", account.clone())
            .proposer(account.clone());
        let receipt = self
            .client
            .gateway()
            .submit(&request, OP_INITIALIZE_ACCOUNT)
            .await?;
        Ok(ResultEnvelope::tx_hash(receipt.transaction_id))
    }

    /// IDs minted under `account`, as an `array` envelope. An account with
    /// no prior mints yields an empty array.
    pub async fn get_ids(&self, account: &Address) -> Result<ResultEnvelope, SdkError> {
        let request = Request::new()
            .import("DappState", account.clone())
            .proposer(account.clone())
            .argument(Argument::address(account));
        let data = self.client.gateway().query(&request, OP_GET_IDS).await?;
        Ok(ResultEnvelope::array("NFT IDs", data))
    }

    /// Subscribe to account-initialization events. Envelopes (object on
    /// delivery, error on failure) reach `callback` until the returned
    /// handle is unsubscribed or dropped.
    #[cfg(feature = "events")]
    pub fn on_initialize_account<F>(&self, callback: F) -> crate::events::Subscription
    where
        G: Clone + 'static,
        F: FnMut(ResultEnvelope) + Send + 'static,
    {
        crate::events::subscribe(
            self.client.gateway().clone(),
            crate::domain::nft::EVENT_INITIALIZE_ACCOUNT,
            self.client.config().chain.poll_interval,
            callback,
        )
    }
}
