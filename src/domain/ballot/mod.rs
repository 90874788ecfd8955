//! Ballot domain — proposal publication and voting.

pub mod client;

/// Mutation registering the proposal list (content identifiers) on chain.
pub const OP_INITIALIZE_PROPOSALS: &str = "ballot_initializeProposals";

/// Mutation issuing a ballot resource to a voter.
pub const OP_ISSUE_BALLOT: &str = "ballot_issueBallot";

/// Mutation casting votes by proposal index.
pub const OP_VOTE: &str = "ballot_vote";

/// Query returning the registered proposal list.
pub const OP_PROPOSAL_LIST: &str = "ballot_proposalList";
