//! Backend API Wrappers
//!
//! Frontend bindings to the REST backend and third-party services, organized by domain.

pub mod auth;
pub mod gemini;
pub mod identity;
pub mod items;
pub mod profile;
pub mod push;

use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::session;

// Re-export the backend calls
pub use auth::*;
pub use items::*;
pub use profile::*;

/// Attach the session bearer token when one is stored
pub(crate) fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Decode a 2xx JSON body or turn the response into `ApiError::Status`
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(error_from_response(resp).await);
    }
    resp.json::<T>().await.map_err(ApiError::from)
}

/// Check for a 2xx status and discard the body
pub(crate) async fn expect_ok(resp: Response) -> Result<(), ApiError> {
    if resp.ok() {
        Ok(())
    } else {
        Err(error_from_response(resp).await)
    }
}

pub(crate) async fn error_from_response(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::warn!("[API] {} {} -> {}", status, resp.url(), body);
    ApiError::Status {
        status,
        code: server_error_code(&body),
        message: server_message(&body),
    }
}

/// Pull a human message out of an error body: `message` wins over `error`
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Error code from a backend error body (`{"error": "EMAIL_NOT_VERIFIED", ...}`)
pub(crate) fn server_error_code(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error").and_then(|v| v.as_str()).map(str::to_string)
}

pub(crate) fn new_form_data() -> Result<web_sys::FormData, ApiError> {
    web_sys::FormData::new().map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_message() {
        let body = r#"{"error":"EMAIL_NOT_VERIFIED","message":"Please verify your email before logging in."}"#;
        assert_eq!(
            server_message(body).as_deref(),
            Some("Please verify your email before logging in.")
        );
        assert_eq!(server_error_code(body).as_deref(), Some("EMAIL_NOT_VERIFIED"));
    }

    #[test]
    fn test_server_message_falls_back_to_error() {
        assert_eq!(
            server_message(r#"{"error":"Invalid email or password"}"#).as_deref(),
            Some("Invalid email or password")
        );
        assert_eq!(server_message(r#"{"message":"  ","error":"x"}"#).as_deref(), Some("x"));
        assert_eq!(server_message("<html>502</html>"), None);
    }
}
