//! Error Types
//!
//! One error enum for every remote call the UI makes.

use thiserror::Error;

use crate::api::identity::IdentityError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS)
    #[error("Network error. Please try again.")]
    Network(String),

    /// Non-2xx response; `message` is the server's `message`/`error` field when present,
    /// `code` the raw `error` field
    #[error("{}", message.as_deref().unwrap_or("Request failed"))]
    Status {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    Identity(IdentityError),

    /// Browser API unavailable or refused (storage, FormData, media)
    #[error("{0}")]
    Browser(String),

    #[error("AI parsing failed: {0}")]
    Extraction(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Machine-readable error code, e.g. `EMAIL_NOT_VERIFIED`
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<wasm_bindgen::JsValue> for ApiError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        ApiError::Browser(v.as_string().unwrap_or_else(|| format!("{:?}", v)))
    }
}
