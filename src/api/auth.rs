//! Auth Endpoints
//!
//! Frontend bindings for `/api/auth`: legacy login/registration,
//! identity token exchange and push token registration.

use gloo_net::http::Request;
use serde::Serialize;

use super::{expect_ok, read_json};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::TokenResponse;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArgs<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firebase_uid: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityLoginArgs<'a> {
    pub email: &'a str,
    pub uid: &'a str,
    pub name: Option<&'a str>,
    pub email_verified: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushTokenArgs<'a> {
    fcm_token: &'a str,
}

// ========================
// Calls
// ========================

/// Username/password login against the backend's own user table
pub async fn legacy_login(cfg: &AppConfig, email: &str, password: &str) -> Result<String, ApiError> {
    let resp = Request::post(&cfg.api_url("/api/auth/login"))
        .json(&LoginArgs { email, password })?
        .send()
        .await?;
    read_json::<TokenResponse>(resp).await.map(|r| r.token)
}

pub async fn legacy_register(cfg: &AppConfig, args: &RegisterArgs<'_>) -> Result<(), ApiError> {
    let resp = Request::post(&cfg.api_url("/api/auth/register"))
        .json(args)?
        .send()
        .await?;
    expect_ok(resp).await
}

/// Trade a verified identity account for a backend JWT
pub async fn identity_login(cfg: &AppConfig, args: &IdentityLoginArgs<'_>) -> Result<String, ApiError> {
    let resp = Request::post(&cfg.api_url("/api/auth/firebase-login"))
        .json(args)?
        .send()
        .await?;
    read_json::<TokenResponse>(resp).await.map(|r| r.token)
}

/// Register this device's push token; `jwt` is passed explicitly since it may not be stored yet
pub async fn update_push_token(cfg: &AppConfig, jwt: &str, push_token: &str) -> Result<(), ApiError> {
    let resp = Request::post(&cfg.api_url("/api/auth/update-fcm-token"))
        .header("Authorization", &format!("Bearer {}", jwt))
        .json(&PushTokenArgs { fcm_token: push_token })?
        .send()
        .await?;
    expect_ok(resp).await
}
