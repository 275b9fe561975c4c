//! # Alert Dispatch Subsystem
//!
//! Delivers one emergency message to many recipient channels at once and
//! reports exactly what happened to each of them.
//!
//! Partial failure is a first-class result: a [`DispatchResult`] always holds
//! one [`DispatchOutcome`] per input channel, in input order, and
//! `all_succeeded` is false as soon as any of them failed.
//!
//! ## Channels
//!
//! | Kind           | Handling                                          |
//! |----------------|---------------------------------------------------|
//! | `Sms`          | Sent through the [`SmsGateway`] port              |
//! | `DirectDial`   | Validated, returned as a `tel:` [`DeepLink`]      |
//! | `ChatDeeplink` | Validated, returned as a `https://wa.me/` link    |
//!
//! ## Example
//!
//! ```rust
//! use cb_03_alert_dispatch::{
//!     AlertDispatchApi, AlertDispatcher, DispatchConfig, GatewayError, MockSmsGateway,
//! };
//! use shared_types::{AlertMessage, RecipientChannel};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let gateway = Arc::new(MockSmsGateway::new());
//! gateway.fail_for("+15550000002", GatewayError::Rejected { reason: "blocked".into() });
//!
//! let dispatcher = AlertDispatcher::new(DispatchConfig::default(), gateway);
//! let result = dispatcher
//!     .dispatch(
//!         &AlertMessage::new("help"),
//!         &[RecipientChannel::sms("+15550000001"), RecipientChannel::sms("+15550000002")],
//!     )
//!     .await;
//!
//! assert!(!result.all_succeeded);
//! assert!(result.outcomes[0].succeeded);
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{HttpSmsGateway, MockSmsGateway};
pub use domain::{DeepLink, DeepLinkKind, DispatchOutcome, DispatchResult, SmsReceipt};
pub use error::{GatewayError, GatewayResult};
pub use ports::{AlertDispatchApi, SmsGateway};
pub use service::{AlertDispatcher, DispatchConfig, DEFAULT_SEND_TIMEOUT};
