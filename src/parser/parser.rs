use serde_json::Value;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// JSON pointers checked for the bearer token, in order of preference.
static TOKEN_POINTERS: [&str; 2] = ["/access_token", "/token"];

/// Extract the bearer token from a login response body.
///
/// Standard OAuth2 password-flow servers answer with `access_token`; some
/// backends use a bare `token` field instead. Empty strings are skipped.
/// Other fields such as `expires_in` are ignored: the token lifetime comes
/// from configuration.
pub fn parse_login_response(body: &str) -> Result<String, GatewayError> {
    let json_body: Value = serde_json::from_str(body).map_err(|e| {
        warn!("login response body is not valid JSON: {}", e);
        GatewayError::Protocol(format!("login response is not valid JSON: {}", e))
    })?;

    TOKEN_POINTERS
        .iter()
        .find_map(|pointer| {
            json_body
                .pointer(pointer)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    debug!("token found at '{}'", pointer);
                    token.to_owned()
                })
        })
        .ok_or_else(|| GatewayError::Protocol("No access token found in response".to_owned()))
}
