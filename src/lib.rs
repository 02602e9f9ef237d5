//! # MQ Gateway Library
//!
//! Forwards MQ administrative commands to a REST management API,
//! authenticating with a short-lived bearer token that is cached,
//! refreshed ahead of expiry and re-acquired once when the backend
//! rejects it.
//!
//! Modules:
//! - `config` — backend and logging configuration
//! - `cache` — credential and token cache
//! - `sources` — login against the backend token endpoint
//! - `parser` — extracting the token from the login response
//! - `client` — authenticated requests with retry-once on rejection
//! - `tools` — passthrough administrative operations
//! - `server` — long-running tool loop over newline-delimited JSON

pub mod config;
pub mod cache;
pub mod client;
pub mod error;
pub mod sources;
pub mod parser;
pub mod tools;
pub mod server;
pub mod helpers;
pub mod utils;

#[cfg(test)]
pub mod tests;


pub use crate::config::settings::*;
pub use crate::error::GatewayError;
