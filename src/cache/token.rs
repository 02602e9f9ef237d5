use chrono::{DateTime, Duration, Utc};

use crate::error::GatewayError;

/// Bearer token paired with its expiry. Only built whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn issued(token: String, issued_at: DateTime<Utc>, lifetime: Duration) -> Result<Self, GatewayError> {
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or(GatewayError::TokenLifetime {
                lifetime_seconds: lifetime.num_seconds(),
            })?;
        Ok(Self { token, expires_at })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Instant from which the token is considered due for renewal.
    pub fn refresh_at(&self, safety_margin: Duration) -> DateTime<Utc> {
        self.expires_at
            .checked_sub_signed(safety_margin)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// `now < expiry - safety_margin`
    pub fn is_fresh(&self, now: DateTime<Utc>, safety_margin: Duration) -> bool {
        now < self.refresh_at(safety_margin)
    }
}
