use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::settings::BackendConfig;
use crate::error::GatewayError;
use crate::parser::parser::parse_login_response;

/// OAuth2 password-flow login against `{base_url}/token`.
#[derive(Debug, Clone)]
pub struct LoginSource {
    pub config: Arc<BackendConfig>,
    pub client: Client,
}

impl LoginSource {
    pub fn new(config: Arc<BackendConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// One login attempt. No retry here; callers decide.
    pub async fn fetch_token(&self) -> Result<String, GatewayError> {
        let login_url = self.config.login_url();
        info!("requesting new token from: {}", login_url);
        debug!("authenticating with username: {}", self.config.username);

        let form = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .client
            .post(&login_url)
            .form(&form)
            .timeout(self.config.request_timeout())
            .send()
            .await
            .map_err(|err| self.classify(err, &login_url))?;

        let status = response.status();
        debug!("token response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|err| self.classify(err, &login_url))?;

        if !status.is_success() {
            error!(url = %login_url, status = %status, body = %body, "authentication rejected");
            return Err(GatewayError::Authentication { status, body });
        }

        parse_login_response(&body).inspect_err(|err| {
            error!(url = %login_url, error = %err, "authentication failed");
        })
    }

    fn classify(&self, err: reqwest::Error, login_url: &str) -> GatewayError {
        let err = GatewayError::from_reqwest(err, &self.config.base_url, login_url);
        match &err {
            GatewayError::Connection { .. } => {
                error!("connection error - cannot reach server at {}", login_url);
                error!("make sure the management API is running on {}", self.config.base_url);
            }
            _ => error!(url = %login_url, error = %err, "HTTP error during authentication"),
        }
        err
    }
}
