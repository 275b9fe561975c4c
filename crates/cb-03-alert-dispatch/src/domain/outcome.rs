//! Per-recipient outcomes and the aggregate dispatch result.

use crate::domain::deeplink::DeepLink;
use crate::error::GatewayError;
use serde::Serialize;
use shared_types::RecipientChannel;

/// Gateway acknowledgement of an accepted SMS.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SmsReceipt {
    /// Provider message id, when the gateway returns one.
    pub sid: Option<String>,
}

/// Result for one recipient channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchOutcome {
    pub channel: RecipientChannel,
    pub succeeded: bool,
    /// Human-readable failure, `None` on success.
    pub error_detail: Option<String>,
    /// Typed failure cause.
    #[serde(skip)]
    pub error: Option<GatewayError>,
    /// Dial or chat link for the presentation layer.
    pub action: Option<DeepLink>,
    /// Gateway receipt for delivered SMS.
    pub receipt: Option<SmsReceipt>,
}

impl DispatchOutcome {
    pub fn sent(channel: RecipientChannel, receipt: SmsReceipt) -> Self {
        Self {
            channel,
            succeeded: true,
            error_detail: None,
            error: None,
            action: None,
            receipt: Some(receipt),
        }
    }

    pub fn prepared(channel: RecipientChannel, action: DeepLink) -> Self {
        Self {
            channel,
            succeeded: true,
            error_detail: None,
            error: None,
            action: Some(action),
            receipt: None,
        }
    }

    pub fn failed(channel: RecipientChannel, error: GatewayError) -> Self {
        Self {
            channel,
            succeeded: false,
            error_detail: Some(error.to_string()),
            error: Some(error),
            action: None,
            receipt: None,
        }
    }
}

/// Aggregate of one dispatch, outcomes in input channel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub outcomes: Vec<DispatchOutcome>,
    /// True only if every outcome succeeded (vacuously true with no channels).
    pub all_succeeded: bool,
}

impl DispatchResult {
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<DispatchOutcome>) -> Self {
        let all_succeeded = outcomes.iter().all(|o| o.succeeded);
        Self {
            outcomes,
            all_succeeded,
        }
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    /// Channels whose outcome failed, in input order.
    pub fn failed_channels(&self) -> Vec<&RecipientChannel> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .map(|o| &o.channel)
            .collect()
    }

    /// Some but not all recipients succeeded.
    pub fn is_partial_failure(&self) -> bool {
        let succeeded = self.succeeded_count();
        succeeded > 0 && succeeded < self.outcomes.len()
    }

    /// Dial and chat links the presentation layer can open.
    pub fn actions(&self) -> impl Iterator<Item = &DeepLink> {
        self.outcomes.iter().filter_map(|o| o.action.as_ref())
    }
}
