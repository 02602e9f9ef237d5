use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use crate::error::GatewayError;

/// Per-request extras supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Option<HeaderMap>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn json(body: Value) -> Self {
        Self {
            headers: None,
            json: Some(body),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Caller headers plus `Authorization: Bearer <token>`, which always wins.
    pub fn merged_headers(&self, token: &str) -> Result<HeaderMap, GatewayError> {
        let mut headers = self.headers.clone().unwrap_or_default();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            GatewayError::Protocol("token contains characters not allowed in a header".to_owned())
        })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }
}
