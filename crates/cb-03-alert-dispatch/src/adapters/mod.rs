//! # Adapters Layer (Hexagonal Architecture)
//!
//! `SmsGateway` implementations: the HTTP relay used in production and a
//! scriptable mock for tests.

mod http_gateway;
mod mock_gateway;

pub use http_gateway::HttpSmsGateway;
pub use mock_gateway::MockSmsGateway;
