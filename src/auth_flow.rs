//! Sign-in Flow
//!
//! Identity provider first, legacy backend login as fallback, email
//! verification before a backend token is issued. Calls go through
//! [`AuthBackend`] so the orchestration can run without a browser.

use crate::api::identity::IdentityUser;
use crate::api::{self, IdentityLoginArgs, RegisterArgs};
use crate::config::AppConfig;
use crate::error::ApiError;

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const RESEND_COOLDOWN_SECS: u32 = 60;

const EMAIL_NOT_VERIFIED: &str = "EMAIL_NOT_VERIFIED";

/// Remote calls used by the flow
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn identity_sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, ApiError>;
    async fn identity_sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, ApiError>;
    async fn send_verification(&self, id_token: &str) -> Result<(), ApiError>;
    async fn lookup_verified(&self, id_token: &str) -> Result<bool, ApiError>;
    /// Trade a verified identity account for a backend JWT
    async fn exchange(&self, user: &IdentityUser, name: Option<&str>) -> Result<String, ApiError>;
    async fn legacy_login(&self, email: &str, password: &str) -> Result<String, ApiError>;
    async fn legacy_register(&self, name: &str, email: &str, password: &str, uid: &str) -> Result<(), ApiError>;
    /// Best effort; never fails
    async fn register_push(&self, jwt: &str);
}

/// Which input an error belongs under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    General,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub field: AuthField,
    pub message: String,
}

impl AuthFailure {
    fn general(message: impl Into<String>) -> Self {
        Self { field: AuthField::General, message: message.into() }
    }
}

/// Account waiting for its email link to be clicked
#[derive(Debug, Clone, PartialEq)]
pub struct PendingVerification {
    pub user: IdentityUser,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Backend JWT, ready to persist
    LoggedIn(String),
    /// Verification mail sent; show the verification screen
    VerificationSent(PendingVerification),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Identity error text, or the generic failure for anything else
pub fn identity_message(err: &ApiError) -> String {
    match err {
        ApiError::Identity(e) => e.to_string(),
        _ => "Authentication failed. Please try again.".to_string(),
    }
}

fn exchange_failure(err: &ApiError, fallback: &str) -> AuthFailure {
    AuthFailure::general(err.server_message().unwrap_or(fallback))
}

/// Map a legacy login failure to its user-facing message
pub fn legacy_failure_message(err: &ApiError) -> &'static str {
    if err.code() == Some(EMAIL_NOT_VERIFIED) || err.server_message() == Some(EMAIL_NOT_VERIFIED) {
        "Please verify your email before logging in."
    } else {
        "Invalid email or password."
    }
}

/// Email/password sign-in
pub async fn sign_in<B: AuthBackend>(backend: &B, email: &str, password: &str) -> Result<AuthOutcome, AuthFailure> {
    match backend.identity_sign_in(email, password).await {
        Ok(user) if user.email_verified => {
            let token = backend
                .exchange(&user, None)
                .await
                .map_err(|e| exchange_failure(&e, "Login failed"))?;
            log::info!("[AUTH] signed in via identity provider");
            Ok(AuthOutcome::LoggedIn(token))
        }
        Ok(user) => {
            if let Err(e) = backend.send_verification(&user.id_token).await {
                log::warn!("[AUTH] verification mail failed: {}", e);
            }
            Ok(AuthOutcome::VerificationSent(PendingVerification {
                user,
                email: email.to_string(),
                password: password.to_string(),
                name: None,
            }))
        }
        Err(e) => {
            match &e {
                ApiError::Identity(ie) if ie.is_credential_error() => {
                    log::debug!("[AUTH] identity rejected credentials ({:?}), trying legacy login", ie)
                }
                other => log::warn!("[AUTH] identity sign-in failed ({}), trying legacy login", other),
            }
            let token = backend
                .legacy_login(email, password)
                .await
                .map_err(|e| AuthFailure::general(legacy_failure_message(&e)))?;
            log::info!("[AUTH] signed in via legacy login");
            Ok(AuthOutcome::LoggedIn(token))
        }
    }
}

/// Client-side checks before creating an account
pub fn validate_registration(reg: &Registration) -> Result<(), AuthFailure> {
    if reg.password != reg.confirm_password {
        return Err(AuthFailure {
            field: AuthField::ConfirmPassword,
            message: "Passwords do not match".to_string(),
        });
    }
    if reg.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthFailure {
            field: AuthField::Password,
            message: format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        });
    }
    Ok(())
}

/// Create the identity account, mirror it to the backend, send the verification mail
pub async fn register<B: AuthBackend>(backend: &B, reg: &Registration) -> Result<PendingVerification, AuthFailure> {
    validate_registration(reg)?;

    let user = backend
        .identity_sign_up(&reg.email, &reg.password)
        .await
        .map_err(|e| AuthFailure::general(identity_message(&e)))?;

    if let Err(e) = backend
        .legacy_register(&reg.name, &reg.email, &reg.password, &user.uid)
        .await
    {
        log::warn!("[AUTH] backend registration mirror failed: {}", e);
    }

    backend
        .send_verification(&user.id_token)
        .await
        .map_err(|e| AuthFailure::general(identity_message(&e)))?;

    log::info!("[AUTH] registered {}, awaiting verification", reg.email);
    Ok(PendingVerification {
        user,
        email: reg.email.clone(),
        password: reg.password.clone(),
        name: Some(reg.name.clone()).filter(|n| !n.trim().is_empty()),
    })
}

/// Re-check the account; on success exchange for a JWT and register push
pub async fn check_verification<B: AuthBackend>(
    backend: &B,
    pending: &mut PendingVerification,
) -> Result<String, AuthFailure> {
    let verified = match backend.lookup_verified(&pending.user.id_token).await {
        Ok(v) => v,
        Err(e) => {
            log::debug!("[AUTH] lookup failed ({}), signing in again", e);
            let fresh = backend
                .identity_sign_in(&pending.email, &pending.password)
                .await
                .map_err(|_| AuthFailure::general("Could not check verification status. Please try logging in again."))?;
            let verified = fresh.email_verified;
            pending.user = fresh;
            verified
        }
    };

    if !verified {
        return Err(AuthFailure::general(
            "Email not verified yet. Please check your inbox and click the link.",
        ));
    }
    pending.user.email_verified = true;

    let token = backend
        .exchange(&pending.user, pending.name.as_deref())
        .await
        .map_err(|e| exchange_failure(&e, "Login failed after verification."))?;
    backend.register_push(&token).await;
    Ok(token)
}

pub async fn resend_verification<B: AuthBackend>(backend: &B, pending: &PendingVerification) -> Result<(), AuthFailure> {
    backend
        .send_verification(&pending.user.id_token)
        .await
        .map_err(|_| AuthFailure::general("Failed to resend. Please try again."))
}

/// Resend countdown, ticked once per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
}

impl Cooldown {
    pub fn start(&mut self) {
        self.remaining = RESEND_COOLDOWN_SECS;
    }

    /// One second elapsed; returns the seconds left
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn label(&self) -> String {
        if self.is_ready() {
            "Resend verification email".to_string()
        } else {
            format!("Resend in {}s", self.remaining)
        }
    }
}

/// Live backend
pub struct HttpAuthBackend {
    pub config: AppConfig,
}

impl AuthBackend for HttpAuthBackend {
    async fn identity_sign_in(&self, email: &str, password: &str) -> Result<IdentityUser, ApiError> {
        api::identity::sign_in(&self.config, email, password).await
    }

    async fn identity_sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, ApiError> {
        api::identity::sign_up(&self.config, email, password).await
    }

    async fn send_verification(&self, id_token: &str) -> Result<(), ApiError> {
        api::identity::send_verification_email(&self.config, id_token).await
    }

    async fn lookup_verified(&self, id_token: &str) -> Result<bool, ApiError> {
        api::identity::lookup_verified(&self.config, id_token).await
    }

    async fn exchange(&self, user: &IdentityUser, name: Option<&str>) -> Result<String, ApiError> {
        let args = IdentityLoginArgs {
            email: &user.email,
            uid: &user.uid,
            name,
            email_verified: user.email_verified,
        };
        api::identity_login(&self.config, &args).await
    }

    async fn legacy_login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        api::legacy_login(&self.config, email, password).await
    }

    async fn legacy_register(&self, name: &str, email: &str, password: &str, uid: &str) -> Result<(), ApiError> {
        let args = RegisterArgs { name, email, password, firebase_uid: Some(uid) };
        api::legacy_register(&self.config, &args).await
    }

    async fn register_push(&self, jwt: &str) {
        api::push::register_device(&self.config, jwt).await;
    }
}
