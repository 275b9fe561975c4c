//! Alert Dispatcher
//!
//! Fans one message out to every recipient channel:
//!
//! - `Sms` channels are normalized, de-duplicated and sent concurrently
//!   through the `SmsGateway`, each bounded by its own `send_timeout`
//! - `DirectDial` / `ChatDeeplink` channels are validated and turned into a
//!   `DeepLink` for the presentation layer
//!
//! Sends are joined with `join_all`, so one slow or failing recipient never
//! cancels the others. Outcomes are assembled by input index, not arrival
//! order. A timed-out send only stops the wait; the gateway may still deliver.

use crate::domain::{DeepLink, DispatchOutcome, DispatchResult, SmsReceipt};
use crate::error::{GatewayError, GatewayResult};
use crate::metrics;
use crate::ports::inbound::AlertDispatchApi;
use crate::ports::outbound::SmsGateway;
use async_trait::async_trait;
use futures::future::join_all;
use shared_types::{AlertMessage, RecipientChannel};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default upper bound on one SMS send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Dispatcher configuration
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Upper bound on each individual gateway call
    pub send_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

/// How one input channel gets its outcome.
enum Plan {
    /// Decided without touching the gateway.
    Resolved(DispatchOutcome),
    /// Takes the result of the send in this slot.
    Send { slot: usize },
}

/// Alert Dispatcher implementation
pub struct AlertDispatcher<G: SmsGateway> {
    config: DispatchConfig,
    gateway: Arc<G>,
}

impl<G: SmsGateway> AlertDispatcher<G> {
    pub fn new(config: DispatchConfig, gateway: Arc<G>) -> Self {
        Self { config, gateway }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    async fn send_bounded(&self, number: &str, body: &str) -> GatewayResult<SmsReceipt> {
        let timeout = self.config.send_timeout;
        let result = match tokio::time::timeout(timeout, self.gateway.send_sms(number, body)).await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout {
                elapsed_ms: timeout.as_millis() as u64,
            }),
        };
        metrics::record_send(match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        });
        result
    }

    fn plan(
        channels: &[RecipientChannel],
        body: &str,
    ) -> (Vec<Plan>, Vec<String>) {
        let mut plans = Vec::with_capacity(channels.len());
        let mut numbers: Vec<String> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for channel in channels {
            let plan = match DeepLink::for_channel(channel, body) {
                Ok(Some(link)) => Plan::Resolved(DispatchOutcome::prepared(channel.clone(), link)),
                Err(e) => Plan::Resolved(DispatchOutcome::failed(channel.clone(), e.into())),
                Ok(None) => match channel.normalized_number() {
                    Ok(number) => {
                        let slot = *slots.entry(number.clone()).or_insert_with(|| {
                            numbers.push(number);
                            numbers.len() - 1
                        });
                        Plan::Send { slot }
                    }
                    Err(e) => Plan::Resolved(DispatchOutcome::failed(channel.clone(), e.into())),
                },
            };
            plans.push(plan);
        }

        (plans, numbers)
    }

    async fn fan_out(
        &self,
        message: &AlertMessage,
        channels: &[RecipientChannel],
    ) -> Vec<DispatchOutcome> {
        let (plans, numbers) = Self::plan(channels, &message.body);
        debug!(
            channels = channels.len(),
            sms_sends = numbers.len(),
            "Dispatch planned"
        );

        let results: Vec<GatewayResult<SmsReceipt>> = join_all(
            numbers
                .iter()
                .map(|number| self.send_bounded(number, &message.body)),
        )
        .await;

        plans
            .into_iter()
            .zip(channels)
            .map(|(plan, channel)| {
                let outcome = match plan {
                    Plan::Resolved(outcome) => outcome,
                    Plan::Send { slot } => match &results[slot] {
                        Ok(receipt) => DispatchOutcome::sent(channel.clone(), receipt.clone()),
                        Err(e) => DispatchOutcome::failed(channel.clone(), e.clone()),
                    },
                };
                if let Some(error) = &outcome.error {
                    warn!(
                        channel = %outcome.channel,
                        kind = error.kind(),
                        error = %error,
                        "Alert delivery failed"
                    );
                }
                outcome
            })
            .collect()
    }

    fn summarize(outcomes: Vec<DispatchOutcome>) -> DispatchResult {
        let result = DispatchResult::from_outcomes(outcomes);
        info!(
            recipients = result.outcomes.len(),
            succeeded = result.succeeded_count(),
            failed = result.failed_count(),
            all_succeeded = result.all_succeeded,
            "Alert dispatch complete"
        );
        metrics::record_dispatch(result.all_succeeded);
        result
    }
}

#[async_trait]
impl<G: SmsGateway + 'static> AlertDispatchApi for AlertDispatcher<G> {
    async fn dispatch(
        &self,
        message: &AlertMessage,
        channels: &[RecipientChannel],
    ) -> DispatchResult {
        let outcomes = self.fan_out(message, channels).await;
        Self::summarize(outcomes)
    }

    async fn retry_failed(
        &self,
        message: &AlertMessage,
        previous: &DispatchResult,
    ) -> DispatchResult {
        let failed: Vec<usize> = previous
            .outcomes
            .iter()
            .enumerate()
            .filter(|(_, outcome)| !outcome.succeeded)
            .map(|(index, _)| index)
            .collect();
        if failed.is_empty() {
            return previous.clone();
        }

        let channels: Vec<RecipientChannel> = failed
            .iter()
            .map(|&index| previous.outcomes[index].channel.clone())
            .collect();
        info!(retrying = channels.len(), "Retrying failed alert channels");
        let retried = self.fan_out(message, &channels).await;

        let mut outcomes = previous.outcomes.clone();
        for (index, outcome) in failed.into_iter().zip(retried) {
            outcomes[index] = outcome;
        }
        Self::summarize(outcomes)
    }

    fn send_timeout(&self) -> Duration {
        self.config.send_timeout
    }
}
