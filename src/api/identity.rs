//! Identity Provider
//!
//! Email/password accounts through the identity toolkit REST surface:
//! sign-in, sign-up, verification mail and account lookup.

use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::error::ApiError;

const IDENTITY_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity provider failure, keyed by provider error code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("No account found with this email.")]
    UserNotFound,
    #[error("Incorrect password.")]
    WrongPassword,
    #[error("Invalid email or password.")]
    InvalidCredential,
    #[error("Email already in use. Please login.")]
    EmailAlreadyInUse,
    #[error("Password must be at least 6 characters.")]
    WeakPassword,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Too many attempts. Please try again later.")]
    TooManyRequests,
    #[error("Authentication failed. Please try again.")]
    Other(String),
}

impl IdentityError {
    /// Map a provider error message (`EMAIL_NOT_FOUND`, `WEAK_PASSWORD : ...`) to a variant
    pub fn from_code(raw: &str) -> Self {
        let code = raw.split(':').next().unwrap_or_default().trim();
        match code {
            "EMAIL_NOT_FOUND" | "auth/user-not-found" => IdentityError::UserNotFound,
            "INVALID_PASSWORD" | "auth/wrong-password" => IdentityError::WrongPassword,
            "INVALID_LOGIN_CREDENTIALS" | "auth/invalid-credential" => IdentityError::InvalidCredential,
            "EMAIL_EXISTS" | "auth/email-already-in-use" => IdentityError::EmailAlreadyInUse,
            "WEAK_PASSWORD" | "auth/weak-password" => IdentityError::WeakPassword,
            "INVALID_EMAIL" | "MISSING_EMAIL" | "auth/invalid-email" => IdentityError::InvalidEmail,
            "TOO_MANY_ATTEMPTS_TRY_LATER" | "auth/too-many-requests" => IdentityError::TooManyRequests,
            other => IdentityError::Other(other.to_string()),
        }
    }

    /// Credential errors that may belong to an account only the legacy backend knows
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            IdentityError::UserNotFound
                | IdentityError::WrongPassword
                | IdentityError::InvalidCredential
                | IdentityError::InvalidEmail
        )
    }
}

/// Signed-in identity account
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityUser {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub email_verified: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordArgs<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobArgs<'a> {
    request_type: &'a str,
    id_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupArgs<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn endpoint(cfg: &AppConfig, method: &str) -> String {
    format!("{}/accounts:{}?key={}", IDENTITY_BASE, method, cfg.identity_api_key)
}

/// Parse the provider's `{"error":{"message":"CODE"}}` body
pub(crate) fn identity_error_from_body(body: &str) -> IdentityError {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| IdentityError::from_code(&env.error.message))
        .unwrap_or_else(|_| IdentityError::Other(String::new()))
}

async fn read_identity<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        let err = identity_error_from_body(&body);
        log::warn!("[IDENTITY] {} -> {:?}", resp.status(), err);
        return Err(ApiError::Identity(err));
    }
    resp.json::<T>().await.map_err(ApiError::from)
}

/// Sign in, then look up the verification flag
pub async fn sign_in(cfg: &AppConfig, email: &str, password: &str) -> Result<IdentityUser, ApiError> {
    let resp = Request::post(&endpoint(cfg, "signInWithPassword"))
        .json(&PasswordArgs { email, password, return_secure_token: true })?
        .send()
        .await?;
    let signed_in: PasswordResponse = read_identity(resp).await?;
    let email_verified = verified_or_unverified(lookup_verified(cfg, &signed_in.id_token).await);
    Ok(IdentityUser {
        uid: signed_in.local_id,
        email: signed_in.email,
        id_token: signed_in.id_token,
        email_verified,
    })
}

/// A failed lookup does not undo a good password: treat the account as unverified
/// so the caller routes it through the verification gate.
fn verified_or_unverified(lookup: Result<bool, ApiError>) -> bool {
    lookup.unwrap_or_else(|e| {
        log::warn!("[IDENTITY] verification lookup failed, treating as unverified: {}", e);
        false
    })
}

/// Create an account; new accounts are never verified
pub async fn sign_up(cfg: &AppConfig, email: &str, password: &str) -> Result<IdentityUser, ApiError> {
    let resp = Request::post(&endpoint(cfg, "signUp"))
        .json(&PasswordArgs { email, password, return_secure_token: true })?
        .send()
        .await?;
    let created: PasswordResponse = read_identity(resp).await?;
    Ok(IdentityUser {
        uid: created.local_id,
        email: created.email,
        id_token: created.id_token,
        email_verified: false,
    })
}

pub async fn send_verification_email(cfg: &AppConfig, id_token: &str) -> Result<(), ApiError> {
    let resp = Request::post(&endpoint(cfg, "sendOobCode"))
        .json(&OobArgs { request_type: "VERIFY_EMAIL", id_token })?
        .send()
        .await?;
    read_identity::<serde_json::Value>(resp).await.map(|_| ())
}

/// Fresh `emailVerified` flag for the account behind `id_token`
pub async fn lookup_verified(cfg: &AppConfig, id_token: &str) -> Result<bool, ApiError> {
    let resp = Request::post(&endpoint(cfg, "lookup"))
        .json(&LookupArgs { id_token })?
        .send()
        .await?;
    let found: LookupResponse = read_identity(resp).await?;
    let account = found
        .users
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Identity(IdentityError::UserNotFound))?;
    log::debug!("[IDENTITY] lookup {} ({}) verified={}", account.local_id, account.email, account.email_verified);
    Ok(account.email_verified)
}
