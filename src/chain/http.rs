//! HTTP access-node gateway — `HttpChainGateway`.
//!
//! One method per access-node endpoint, with per-endpoint retry policies:
//! reads retry, submissions never do. Sealing is awaited by polling the
//! transaction result until a terminal status or the configured window
//! elapses.

use crate::chain::gateway::ChainGateway;
use crate::chain::retry::{RetryConfig, RetryPolicy};
use crate::chain::wire::{
    AccountResponse, EventsPage, SubmitResponse, TxReceipt, TxResultResponse, TxStatus,
};
use crate::chain::Request;
use crate::config::ChainConfig;
use crate::error::GatewayError;
use crate::shared::Address;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// HTTP client for a ledger access node's REST API.
pub struct HttpChainGateway {
    base_url: String,
    client: Client,
    seal_timeout: Duration,
    poll_interval: Duration,
}

impl HttpChainGateway {
    pub fn new(config: &ChainConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: config.access_url.trim_end_matches('/').to_string(),
            client,
            seal_timeout: config.seal_timeout,
            poll_interval: config.poll_interval,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    async fn account(&self, address: &Address) -> Result<AccountResponse, GatewayError> {
        let url = format!("{}/v1/accounts/{}", self.base_url, address);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    async fn run_script(&self, request: &Request, operation: &str) -> Result<Value, GatewayError> {
        let url = format!("{}/v1/scripts/{}", self.base_url, operation);
        let body = json!({
            "imports": request.imports,
            "arguments": request.arguments,
        });
        self.post(&url, &body, RetryPolicy::Idempotent).await
    }

    async fn send_transaction(
        &self,
        request: &Request,
        operation: &str,
    ) -> Result<TxReceipt, GatewayError> {
        let url = format!("{}/v1/transactions", self.base_url);
        let body = json!({
            "operation": operation,
            "imports": request.imports,
            "roles": request.roles,
            "arguments": request.arguments,
        });
        let submitted: SubmitResponse = self.post(&url, &body, RetryPolicy::None).await?;
        self.wait_for_seal(submitted.transaction_id).await
    }

    /// Poll the transaction result until it seals or the window elapses.
    async fn wait_for_seal(&self, transaction_id: String) -> Result<TxReceipt, GatewayError> {
        let url = format!(
            "{}/v1/transactions/{}/result",
            self.base_url, transaction_id
        );
        let started = Instant::now();

        loop {
            let result: TxResultResponse = self.get(&url, RetryPolicy::Idempotent).await?;

            match result.status {
                TxStatus::Sealed => {
                    if let Some(message) = result.error_message.filter(|m| !m.is_empty()) {
                        return Err(GatewayError::Execution(message));
                    }
                    return Ok(TxReceipt {
                        transaction_id,
                        status: result.status,
                        events: result.events,
                    });
                }
                TxStatus::Expired => {
                    return Err(GatewayError::Execution(format!(
                        "transaction {} expired before sealing",
                        transaction_id
                    )));
                }
                _ => {}
            }

            if started.elapsed() >= self.seal_timeout {
                return Err(GatewayError::SealTimeout {
                    transaction_id,
                    status: result.status.to_string(),
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
            futures_timer::Delay::new(self.poll_interval).await;
        }
    }

    async fn event_page(
        &self,
        event_type: &str,
        from_height: u64,
    ) -> Result<EventsPage, GatewayError> {
        let url = format!(
            "{}/v1/events?type={}&start_height={}",
            self.base_url,
            urlencoding::encode(event_type),
            from_height
        );
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, GatewayError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, GatewayError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, GatewayError> {
        let config = match retry {
            RetryPolicy::None => return self.do_request(&method, url, body).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        GatewayError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        GatewayError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        GatewayError::Timeout => true,
                        GatewayError::Transport(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(GatewayError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, GatewayError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        Err(match status_code {
            404 => GatewayError::NotFound(body_text),
            422 => GatewayError::Execution(body_text),
            429 => GatewayError::RateLimited {
                retry_after_ms: None,
            },
            400..=499 => GatewayError::BadRequest(body_text),
            _ => GatewayError::ServerError {
                status: status_code,
                body: body_text,
            },
        })
    }
}

impl ChainGateway for HttpChainGateway {
    async fn get_account(&self, address: &Address) -> Result<AccountResponse, GatewayError> {
        self.account(address).await
    }

    async fn query(&self, request: &Request, operation: &str) -> Result<Value, GatewayError> {
        self.run_script(request, operation).await
    }

    async fn submit(&self, request: &Request, operation: &str) -> Result<TxReceipt, GatewayError> {
        self.send_transaction(request, operation).await
    }

    async fn events(
        &self,
        event_type: &str,
        from_height: u64,
    ) -> Result<EventsPage, GatewayError> {
        self.event_page(event_type, from_height).await
    }
}

impl Clone for HttpChainGateway {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            seal_timeout: self.seal_timeout,
            poll_interval: self.poll_interval,
        }
    }
}
