//! Ballots sub-client — proposal publication and voting.

use crate::chain::argument::Argument;
use crate::chain::gateway::ChainGateway;
use crate::chain::Request;
use crate::client::TallyClient;
use crate::domain::ballot::{
    OP_INITIALIZE_PROPOSALS, OP_ISSUE_BALLOT, OP_PROPOSAL_LIST, OP_VOTE,
};
use crate::envelope::{Formatter, ResultEnvelope};
use crate::error::SdkError;
use crate::shared::Address;
use crate::store::{ContentStore, FileSource, ProgressFn, UploadOptions};

pub struct Ballots<'a, G, S> {
    pub(crate) client: &'a TallyClient<G, S>,
}

impl<'a, G: ChainGateway, S: ContentStore> Ballots<'a, G, S> {
    /// Publish proposals: upload `files` to the content store (wrapped in a
    /// directory, pinned), then register the resulting content identifiers
    /// on chain in upload order. Returns a `tx-hash` envelope.
    ///
    /// Fail-fast composite: an upload failure means the mutation is never
    /// attempted. If the mutation fails after the upload succeeded, the
    /// uploaded content stays pinned — re-running re-adds the same bytes and
    /// receives the same identifiers, so there is nothing to roll back.
    pub async fn initialize_proposals(
        &self,
        admin: &Address,
        files: Vec<FileSource>,
        progress: Option<ProgressFn>,
    ) -> Result<ResultEnvelope, SdkError> {
        let options = UploadOptions {
            wrap_with_directory: true,
            pin: true,
        };
        let uploaded = self.client.store().add(files, options, progress).await?;

        let proposals: Vec<String> = uploaded.iter().map(|f| f.cid.to_string()).collect();
        let request = Request::new()
            .import("DappState", admin.clone())
            .proposer(admin.clone())
            .argument(Argument::string_array(proposals));
        let receipt = self
            .client
            .gateway()
            .submit(&request, OP_INITIALIZE_PROPOSALS)
            .await?;
        Ok(ResultEnvelope::tx_hash(receipt.transaction_id))
    }

    /// Issue a ballot to `voter`. Both admin and voter authorize the
    /// transaction; the admin proposes it.
    pub async fn issue_ballot(
        &self,
        admin: &Address,
        voter: &Address,
    ) -> Result<ResultEnvelope, SdkError> {
        let request = Request::new()
            .import("DappState", admin.clone())
            .proposer(admin.clone())
            .authorizer(admin.clone())
            .authorizer(voter.clone());
        let receipt = self
            .client
            .gateway()
            .submit(&request, OP_ISSUE_BALLOT)
            .await?;
        Ok(ResultEnvelope::tx_hash(receipt.transaction_id))
    }

    /// Cast a vote for the proposal at `proposal_index`.
    pub async fn vote(
        &self,
        voter: &Address,
        proposal_index: u64,
    ) -> Result<ResultEnvelope, SdkError> {
        let request = Request::new()
            .import("DappState", voter.clone())
            .proposer(voter.clone())
            .argument(Argument::uint64_array([proposal_index]));
        let receipt = self.client.gateway().submit(&request, OP_VOTE).await?;
        Ok(ResultEnvelope::tx_hash(receipt.transaction_id))
    }

    /// The registered proposal list as an `array` envelope of content
    /// identifiers, condensed for display.
    pub async fn proposal_list(&self, ballot_owner: &Address) -> Result<ResultEnvelope, SdkError> {
        let request = Request::new().import("DappState", ballot_owner.clone());
        let data = self
            .client
            .gateway()
            .query(&request, OP_PROPOSAL_LIST)
            .await?;
        Ok(ResultEnvelope::array("Proposals", data)
            .with_formatter(vec![Formatter::Condensed { begin: 20, end: 5 }]))
    }
}
