//! Event subscriptions.
//!
//! A subscription is keyed by a fully qualified event name. Delivered
//! payloads are normalized before reaching the callback: any property whose
//! key is a pure non-negative integer is positional/internal and gets
//! stripped; the remainder is wrapped as an `object` envelope. A delivery
//! failure reaches the callback as an `error` envelope instead — the caller
//! sees every outcome through the same channel.
//!
//! At most one outstanding subscription per event type is assumed. The
//! returned [`Subscription`] handle owns the lifecycle: `unsubscribe()`
//! stops the poller gracefully, dropping the handle aborts it.

use crate::envelope::ResultEnvelope;
use crate::error::EventDeliveryError;
use serde_json::{Map, Value};

fn is_positional_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_digit())
}

/// Strip positional/internal properties: any key that is a pure
/// non-negative integer.
pub fn named_properties(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(key, _)| !is_positional_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Normalize a raw event payload for delivery.
pub fn normalize_payload(event: &str, payload: &Value) -> Result<Value, EventDeliveryError> {
    match payload {
        Value::Object(map) => Ok(Value::Object(named_properties(map))),
        _ => Err(EventDeliveryError::NonObjectPayload {
            event: event.to_string(),
        }),
    }
}

/// The envelope handed to the callback for a delivered event.
pub fn event_envelope(event: &str, payload: Value) -> ResultEnvelope {
    ResultEnvelope::object(format!("Event {}", event), payload).with_event(event)
}

/// The envelope handed to the callback when delivery fails.
pub fn delivery_error_envelope(event: &str, error: &EventDeliveryError) -> ResultEnvelope {
    ResultEnvelope::error(error).with_event(event)
}

#[cfg(feature = "events")]
pub use poller::{subscribe, Subscription};

#[cfg(feature = "events")]
mod poller {
    use super::{delivery_error_envelope, event_envelope, normalize_payload};
    use crate::chain::gateway::ChainGateway;
    use crate::envelope::ResultEnvelope;
    use crate::error::EventDeliveryError;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    /// Handle to an active subscription.
    ///
    /// `unsubscribe()` signals the poller and waits for it to finish;
    /// dropping the handle aborts the poller outright.
    pub struct Subscription {
        event: String,
        stop: Option<oneshot::Sender<()>>,
        task: Option<JoinHandle<()>>,
    }

    impl Subscription {
        pub fn event(&self) -> &str {
            &self.event
        }

        /// Stop polling. No callback invocations happen after this returns.
        pub async fn unsubscribe(mut self) {
            if let Some(stop) = self.stop.take() {
                let _ = stop.send(());
            }
            if let Some(task) = self.task.take() {
                let _ = task.await;
            }
        }
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            if let Some(task) = self.task.take() {
                task.abort();
            }
        }
    }

    /// Register `callback` for a fully qualified event name.
    ///
    /// Spawns a background task that pages the gateway's events from its
    /// current cursor every `poll_interval`. The callback receives an
    /// `object` envelope per delivered event, or an `error` envelope when a
    /// poll or a payload fails; polling continues either way.
    pub fn subscribe<G, F>(
        gateway: G,
        event_type: impl Into<String>,
        poll_interval: Duration,
        mut callback: F,
    ) -> Subscription
    where
        G: ChainGateway + 'static,
        F: FnMut(ResultEnvelope) + Send + 'static,
    {
        let event = event_type.into();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn({
            let event = event.clone();
            async move {
                let mut cursor = 0u64;
                loop {
                    tokio::select! {
                        _ = &mut stop_rx => break,
                        _ = tokio::time::sleep(poll_interval) => {}
                    }

                    match gateway.events(&event, cursor).await {
                        Ok(page) => {
                            cursor = page.next_height;
                            for raw in page.events {
                                match normalize_payload(&event, &raw.payload) {
                                    Ok(named) => callback(event_envelope(&event, named)),
                                    Err(e) => callback(delivery_error_envelope(&event, &e)),
                                }
                            }
                        }
                        Err(e) => {
                            tracing::debug!(event = %event, "event poll failed: {}", e);
                            let e = EventDeliveryError::Poll {
                                event: event.clone(),
                                source: e,
                            };
                            callback(delivery_error_envelope(&event, &e));
                        }
                    }
                }
            }
        });

        Subscription {
            event,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}
