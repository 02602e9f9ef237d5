//! Shared constants and invariants

pub const DEFAULT_TOKEN_LIFETIME_SECONDS: u64 = 15 * 60;
/// invariant: token_lifetime_seconds <= one year
pub const MAX_TOKEN_LIFETIME_SECONDS: u64 = 365 * 24 * 60 * 60;
pub const DEFAULT_SAFETY_MARGIN_SECONDS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";
