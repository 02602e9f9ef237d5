use std::sync::Arc;

use chrono::Duration;
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::cache::token::Credential;
use crate::config::settings::BackendConfig;
use crate::error::GatewayError;
use crate::helpers::time::{format_hms, to_chrono, Clock, SystemClock};
use crate::sources::login::LoginSource;

/// Single-credential token cache shared by every request.
///
/// The credential is swapped as a whole under its lock, which is never held
/// across network I/O. Logins are serialized by a separate refresh gate, so
/// callers that find the cache stale together share a single login.
#[derive(Debug, Clone)]
pub struct TokenCache {
    credential: Arc<RwLock<Option<Credential>>>,
    refresh: Arc<Mutex<()>>,
    login: LoginSource,
    clock: Arc<dyn Clock>,
    token_lifetime: Duration,
    safety_margin: Duration,
}

impl TokenCache {
    pub fn new(config: Arc<BackendConfig>, client: Client) -> Self {
        Self::with_clock(config, client, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<BackendConfig>, client: Client, clock: Arc<dyn Clock>) -> Self {
        Self {
            credential: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
            token_lifetime: to_chrono(config.token_lifetime()),
            safety_margin: to_chrono(config.safety_margin()),
            login: LoginSource::new(config, client),
            clock,
        }
    }

    /// Cached token if still fresh, otherwise a new one from the backend.
    pub async fn get_token(&self) -> Result<String, GatewayError> {
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        // one login at a time; callers that waited re-check the cache first
        let _refresh = self.refresh.lock().await;
        if let Some(token) = self.fresh_token().await {
            debug!("token refreshed by a concurrent caller");
            return Ok(token);
        }

        info!("no fresh token cached, logging in...");
        let token = self.login.fetch_token().await?;
        let credential = Credential::issued(token, self.clock.now(), self.token_lifetime)
            .inspect_err(|err| error!(error = %err, "cannot cache token"))?;
        info!(
            "obtained new token (valid until {})",
            format_hms(&credential.expires_at())
        );

        let token = credential.token().to_owned();
        *self.credential.write().await = Some(credential);
        Ok(token)
    }

    async fn fresh_token(&self) -> Option<String> {
        let credential = self.credential.read().await;
        let token = credential
            .as_ref()
            .filter(|credential| credential.is_fresh(self.clock.now(), self.safety_margin))
            .map(|credential| {
                debug!(
                    "using cached token (expires at {})",
                    format_hms(&credential.expires_at())
                );
                credential.token().to_owned()
            });
        token
    }

    /// Drop the cached credential. The next `get_token` logs in again.
    pub async fn invalidate(&self) {
        let mut credential = self.credential.write().await;
        if credential.take().is_some() {
            warn!("invalidating cached token");
        } else {
            debug!("invalidate called with no cached token");
        }
    }

    /// Copy of the current credential, if any.
    pub async fn snapshot(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }
}
