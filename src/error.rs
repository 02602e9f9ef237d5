use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Backend unreachable at the TCP/TLS level.
    #[error("Cannot connect to management API at {base_url}. Is it running?")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The token endpoint refused the credentials.
    #[error("Authentication failed with status {status}: {body}")]
    Authentication { status: StatusCode, body: String },

    /// The token endpoint answered 2xx but without a usable token.
    #[error("Invalid login response: {0}")]
    Protocol(String),

    /// Login succeeded but `now + lifetime` is not a representable instant.
    #[error("Token lifetime of {lifetime_seconds}s cannot be represented as an expiry")]
    TokenLifetime { lifetime_seconds: i64 },

    /// Final non-2xx from a business endpoint, including a 401 after refresh.
    #[error("Request to {url} failed with status {status}: {body}")]
    Request {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// Timeouts and any other HTTP failure that is not a connect error.
    #[error("HTTP error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// Classifies a reqwest send/read failure.
    pub fn from_reqwest(err: reqwest::Error, base_url: &str, url: &str) -> Self {
        if err.is_connect() {
            GatewayError::Connection {
                base_url: base_url.to_owned(),
                source: err,
            }
        } else {
            GatewayError::Transport {
                url: url.to_owned(),
                source: err,
            }
        }
    }

    /// Login rejected or malformed.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            GatewayError::Authentication { .. } | GatewayError::Protocol(_)
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Authentication { status, .. } | GatewayError::Request { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
