use std::sync::Arc;

use http::{Method, StatusCode};
use reqwest::{Client, Response};
use tracing::{debug, error, info, warn};

use crate::cache::token_cache::TokenCache;
use crate::client::options::RequestOptions;
use crate::config::settings::BackendConfig;
use crate::error::GatewayError;

/// Which try of a request is in flight. A 401 on `First` moves to `Retry`;
/// a 401 on `Retry` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retry,
}

/// Issues bearer-authenticated requests against the management API.
/// Clone is cheap; clones share the HTTP connection pool and the token cache.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    client: Client,
    config: Arc<BackendConfig>,
    tokens: TokenCache,
}

impl AuthenticatedClient {
    pub fn with_parts(config: Arc<BackendConfig>, client: Client, tokens: TokenCache) -> Self {
        Self { client, config, tokens }
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// `method {base_url}{path}`; returns the response body text.
    ///
    /// A 401 invalidates the cached token, logs in again and reissues the
    /// request once. Any final non-2xx becomes [`GatewayError::Request`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.config.base_url, path);
        info!("making {} request to: {}", method, url);

        let mut token = self.tokens.get_token().await?;
        let mut attempt = Attempt::First;

        loop {
            let response = self.send(&method, &url, &options, &token).await?;
            debug!("response status: {} ({:?})", response.status(), attempt);

            if response.status() != StatusCode::UNAUTHORIZED || attempt == Attempt::Retry {
                return self.read_body(response, &url).await;
            }

            warn!("got 401 Unauthorized from {}, invalidating token and retrying...", url);
            self.tokens.invalidate().await;
            token = self.tokens.get_token().await?;
            attempt = Attempt::Retry;
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        options: &RequestOptions,
        token: &str,
    ) -> Result<Response, GatewayError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(options.merged_headers(token)?)
            .timeout(self.config.request_timeout());

        if let Some(body) = &options.json {
            request = request.json(body);
        }

        request.send().await.map_err(|err| self.classify(err, url))
    }

    async fn read_body(&self, response: Response, url: &str) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.classify(err, url))?;

        if status.is_success() {
            return Ok(body);
        }

        error!(url = %url, status = %status, body = %body, "HTTP status error");
        Err(GatewayError::Request {
            url: url.to_owned(),
            status,
            body,
        })
    }

    fn classify(&self, err: reqwest::Error, url: &str) -> GatewayError {
        let err = GatewayError::from_reqwest(err, &self.config.base_url, url);
        match &err {
            GatewayError::Connection { .. } => {
                error!("connection error - cannot reach server at {}", url);
                error!("make sure the management API is running on {}", self.config.base_url);
            }
            _ => error!(url = %url, error = %err, "HTTP error"),
        }
        err
    }
}
