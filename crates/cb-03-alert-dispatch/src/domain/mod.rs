//! Domain layer: outcomes, aggregate results and deep links.

pub mod deeplink;
pub mod outcome;

pub use deeplink::{DeepLink, DeepLinkKind};
pub use outcome::{DispatchOutcome, DispatchResult, SmsReceipt};
