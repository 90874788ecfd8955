//! Dispatch tests: every operation normalizes its outcome into the envelope
//! contract, and requests reaching the gateways carry the right imports,
//! roles, and argument bindings.

use std::sync::Mutex;

use serde_json::{json, Value};
use tally_sdk::prelude::*;

// ─── Doubles ─────────────────────────────────────────────────────────────────

enum QueryBehavior {
    Value(Value),
    ExecutionError(String),
}

struct MockGateway {
    query_behavior: QueryBehavior,
    account: Option<AccountResponse>,
    queries: Mutex<Vec<(String, Request)>>,
    submissions: Mutex<Vec<(String, Request)>>,
}

impl MockGateway {
    fn returning(value: Value) -> Self {
        Self {
            query_behavior: QueryBehavior::Value(value),
            account: None,
            queries: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            query_behavior: QueryBehavior::ExecutionError(message.to_string()),
            account: None,
            queries: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    fn with_account(mut self, account: AccountResponse) -> Self {
        self.account = Some(account);
        self
    }

    fn last_submission(&self) -> (String, Request) {
        self.submissions.lock().unwrap().last().cloned().unwrap()
    }

    fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl ChainGateway for MockGateway {
    async fn get_account(&self, _address: &Address) -> Result<AccountResponse, GatewayError> {
        self.account
            .clone()
            .ok_or_else(|| GatewayError::NotFound("no such account".to_string()))
    }

    async fn query(&self, request: &Request, operation: &str) -> Result<Value, GatewayError> {
        self.queries
            .lock()
            .unwrap()
            .push((operation.to_string(), request.clone()));
        match &self.query_behavior {
            QueryBehavior::Value(v) => Ok(v.clone()),
            QueryBehavior::ExecutionError(m) => Err(GatewayError::Execution(m.clone())),
        }
    }

    async fn submit(&self, request: &Request, operation: &str) -> Result<TxReceipt, GatewayError> {
        self.submissions
            .lock()
            .unwrap()
            .push((operation.to_string(), request.clone()));
        Ok(TxReceipt {
            transaction_id: "b4a93f2e6d8c7a1f".to_string(),
            status: TxStatus::Sealed,
            events: Vec::new(),
        })
    }

    async fn events(&self, _event_type: &str, from_height: u64) -> Result<EventsPage, GatewayError> {
        Ok(EventsPage {
            events: Vec::new(),
            next_height: from_height,
        })
    }
}

struct MockStore {
    fail: bool,
    calls: Mutex<usize>,
}

impl MockStore {
    fn ok() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(0),
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

const CID_A: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
const CID_B: &str = "QmPZ9gcCEpqKTo6aq61g2nXGUhM4iCL3ewB6LDXZCtioEB";

impl ContentStore for MockStore {
    async fn add(
        &self,
        files: Vec<FileSource>,
        _options: UploadOptions,
        _progress: Option<tally_sdk::store::ProgressFn>,
    ) -> Result<Vec<AddedFile>, GatewayError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(GatewayError::Timeout);
        }
        let cids = [CID_A, CID_B];
        Ok(files
            .into_iter()
            .zip(cids)
            .map(|(file, cid)| AddedFile {
                path: file.path,
                cid: ContentId::new(cid),
                size: 42,
                multihash: decode(cid).unwrap(),
            })
            .collect())
    }
}

fn test_accounts() -> Vec<Address> {
    (1..=9).map(|i| Address::new(format!("0x0{}", i))).collect()
}

fn client_with(
    gateway: MockGateway,
    store: MockStore,
) -> TallyClient<MockGateway, MockStore> {
    TallyClient::with_gateways(Config::for_testing(&test_accounts()), gateway, store)
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_ids_defaults_to_empty_array() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let account = Address::new("0x05");

    let envelope = client.nft().get_ids(&account).await.unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::Array);
    assert_eq!(envelope.label, "NFT IDs");
    assert_eq!(envelope.result, json!([]));
}

#[tokio::test]
async fn get_ids_passes_address_argument() {
    let client = client_with(MockGateway::returning(json!([1, 2])), MockStore::ok());
    let account = Address::new("0x05");

    client.nft().get_ids(&account).await.unwrap();

    let queries = client.gateway().queries.lock().unwrap();
    let (operation, request) = queries.last().unwrap();
    assert_eq!(operation, "basic_nft_getIDs");
    assert_eq!(request.arguments, vec![Argument::address(&account)]);
    assert_eq!(request.imports.get("DappState"), Some(&account));
}

#[tokio::test]
async fn proposal_list_is_condensed_array() {
    let client = client_with(
        MockGateway::returning(json!([CID_A, CID_B])),
        MockStore::ok(),
    );
    let owner = client.account_directory().admins[0].clone();

    let envelope = client.ballots().proposal_list(&owner).await.unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::Array);
    assert_eq!(envelope.label, "Proposals");
    assert_eq!(
        envelope.formatters(),
        vec![Formatter::Condensed { begin: 20, end: 5 }]
    );
}

#[tokio::test]
async fn get_account_info_builds_object_envelope() {
    let account = AccountResponse {
        address: Address::new("0xf8d6e0586b0a20c7"),
        balance: "999.00100000".parse().unwrap(),
        keys: vec![AccountKey {
            index: 0,
            public_key: "abcd".to_string(),
            weight: 1000,
            revoked: false,
        }],
    };
    let client = client_with(
        MockGateway::returning(Value::Null).with_account(account),
        MockStore::ok(),
    );

    let envelope = client
        .nft()
        .get_account_info("0xf8d6e0586b0a20c7")
        .await
        .unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::Object);
    assert_eq!(envelope.label, "Account Information");
    assert_eq!(envelope.result["address"], "f8d6e0586b0a20c7");
    assert_eq!(envelope.result["public_key"], "abcd");
}

// ─── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_account_yields_tx_hash() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let account = Address::new("0x05");

    let envelope = client.nft().initialize_account(&account).await.unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::TxHash);
    assert_eq!(envelope.label, "Transaction Hash");
    let id = envelope.result.as_str().unwrap();
    assert!(!id.is_empty());

    let (operation, request) = client.gateway().last_submission();
    assert_eq!(operation, "basic_nft_initializeAccount");
    assert_eq!(request.roles.proposer, Some(account));
}

#[tokio::test]
async fn issue_ballot_authorized_by_admin_and_voter() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let admin = client.account_directory().admins[0].clone();
    let voter = client.account_directory().users[0].clone();

    let envelope = client.ballots().issue_ballot(&admin, &voter).await.unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::TxHash);

    let (operation, request) = client.gateway().last_submission();
    assert_eq!(operation, "ballot_issueBallot");
    assert_eq!(request.roles.proposer, Some(admin.clone()));
    assert_eq!(request.roles.authorizers, vec![admin, voter]);
}

#[tokio::test]
async fn vote_binds_index_as_uint64_array() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let voter = client.account_directory().users[0].clone();

    client.ballots().vote(&voter, 3).await.unwrap();

    let (operation, request) = client.gateway().last_submission();
    assert_eq!(operation, "ballot_vote");
    assert_eq!(request.arguments, vec![Argument::uint64_array([3])]);
    assert_eq!(
        serde_json::to_value(&request.arguments[0]).unwrap(),
        json!({ "type": "Array", "value": [{ "type": "UInt64", "value": "3" }] })
    );
}

// ─── Composite upload-then-submit ────────────────────────────────────────────

#[tokio::test]
async fn initialize_proposals_submits_uploaded_cids_in_order() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let admin = client.account_directory().admins[0].clone();
    let files = vec![
        FileSource::new("proposal-1.md", b"first".to_vec()),
        FileSource::new("proposal-2.md", b"second".to_vec()),
    ];

    let envelope = client
        .ballots()
        .initialize_proposals(&admin, files, None)
        .await
        .unwrap();
    assert_eq!(envelope.kind, EnvelopeKind::TxHash);

    let (operation, request) = client.gateway().last_submission();
    assert_eq!(operation, "ballot_initializeProposals");
    assert_eq!(
        request.arguments,
        vec![Argument::string_array(vec![
            CID_A.to_string(),
            CID_B.to_string()
        ])]
    );
}

#[tokio::test]
async fn initialize_proposals_fails_fast_on_upload_error() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::failing());
    let admin = client.account_directory().admins[0].clone();
    let files = vec![FileSource::new("proposal-1.md", b"first".to_vec())];

    let err = client
        .ballots()
        .initialize_proposals(&admin, files, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Gateway(_)));
    // upload failed, so the mutation was never attempted
    assert_eq!(client.gateway().submission_count(), 0);
    assert_eq!(client.store().call_count(), 1);
}

#[tokio::test]
async fn upload_of_empty_batch_is_empty() {
    let client = client_with(MockGateway::returning(Value::Null), MockStore::ok());
    let uploaded = client.upload(Vec::new(), true, None).await.unwrap();
    assert!(uploaded.is_empty());
}

// ─── Error propagation ───────────────────────────────────────────────────────

#[tokio::test]
async fn argument_mismatch_surfaces_as_gateway_error() {
    let client = client_with(
        MockGateway::rejecting("invalid argument: expected UInt64, got String"),
        MockStore::ok(),
    );
    let account = Address::new("0x05");

    let err = client.nft().get_ids(&account).await.unwrap_err();
    match err {
        SdkError::Gateway(GatewayError::Execution(message)) => {
            assert!(message.contains("expected UInt64"));
        }
        other => panic!("expected execution error, got {:?}", other),
    }
}
