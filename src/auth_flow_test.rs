use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::api::identity::IdentityError;

fn user(verified: bool) -> IdentityUser {
    IdentityUser {
        uid: "uid-1".into(),
        email: "student@campus.edu".into(),
        id_token: "id-token".into(),
        email_verified: verified,
    }
}

fn status(code: &str) -> ApiError {
    ApiError::Status { status: 401, code: Some(code.into()), message: Some(code.into()) }
}

/// Scripted backend recording every call
struct MockBackend {
    sign_in: Result<IdentityUser, ApiError>,
    sign_up: Result<IdentityUser, ApiError>,
    verified: Result<bool, ApiError>,
    exchange: Result<String, ApiError>,
    legacy: Result<String, ApiError>,
    mirror_fails: bool,
    calls: RefCell<Vec<&'static str>>,
    pushed: Cell<bool>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            sign_in: Ok(user(true)),
            sign_up: Ok(user(false)),
            verified: Ok(true),
            exchange: Ok("jwt-identity".into()),
            legacy: Ok("jwt-legacy".into()),
            mirror_fails: false,
            calls: RefCell::new(Vec::new()),
            pushed: Cell::new(false),
        }
    }
}

impl MockBackend {
    fn called(&self, name: &str) -> bool {
        self.calls.borrow().contains(&name)
    }
}

impl AuthBackend for MockBackend {
    async fn identity_sign_in(&self, _email: &str, _password: &str) -> Result<IdentityUser, ApiError> {
        self.calls.borrow_mut().push("identity_sign_in");
        self.sign_in.clone()
    }

    async fn identity_sign_up(&self, _email: &str, _password: &str) -> Result<IdentityUser, ApiError> {
        self.calls.borrow_mut().push("identity_sign_up");
        self.sign_up.clone()
    }

    async fn send_verification(&self, _id_token: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push("send_verification");
        Ok(())
    }

    async fn lookup_verified(&self, _id_token: &str) -> Result<bool, ApiError> {
        self.calls.borrow_mut().push("lookup_verified");
        self.verified.clone()
    }

    async fn exchange(&self, _user: &IdentityUser, _name: Option<&str>) -> Result<String, ApiError> {
        self.calls.borrow_mut().push("exchange");
        self.exchange.clone()
    }

    async fn legacy_login(&self, _email: &str, _password: &str) -> Result<String, ApiError> {
        self.calls.borrow_mut().push("legacy_login");
        self.legacy.clone()
    }

    async fn legacy_register(&self, _name: &str, _email: &str, _password: &str, _uid: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push("legacy_register");
        if self.mirror_fails {
            Err(ApiError::Network("offline".into()))
        } else {
            Ok(())
        }
    }

    async fn register_push(&self, _jwt: &str) {
        self.pushed.set(true);
    }
}

// =============================================================
// Sign-in
// =============================================================

#[test]
fn test_verified_identity_user_gets_backend_token() {
    let backend = MockBackend::default();
    let outcome = block_on(sign_in(&backend, "student@campus.edu", "secret1")).unwrap();
    assert_eq!(outcome, AuthOutcome::LoggedIn("jwt-identity".into()));
    assert!(!backend.called("legacy_login"));
}

#[test]
fn test_wrong_password_falls_back_to_legacy_login() {
    let backend = MockBackend {
        sign_in: Err(ApiError::Identity(IdentityError::WrongPassword)),
        ..Default::default()
    };
    let outcome = block_on(sign_in(&backend, "old@campus.edu", "secret1")).unwrap();
    assert_eq!(outcome, AuthOutcome::LoggedIn("jwt-legacy".into()));
    assert_eq!(*backend.calls.borrow(), vec!["identity_sign_in", "legacy_login"]);
}

#[test]
fn test_unexpected_identity_failure_also_falls_back() {
    let backend = MockBackend {
        sign_in: Err(ApiError::Network("offline".into())),
        ..Default::default()
    };
    block_on(sign_in(&backend, "a@b.c", "secret1")).unwrap();
    assert!(backend.called("legacy_login"));
}

#[test]
fn test_legacy_failures_map_to_messages() {
    let unverified = MockBackend {
        sign_in: Err(ApiError::Identity(IdentityError::UserNotFound)),
        legacy: Err(status("EMAIL_NOT_VERIFIED")),
        ..Default::default()
    };
    let err = block_on(sign_in(&unverified, "a@b.c", "secret1")).unwrap_err();
    assert_eq!(err.message, "Please verify your email before logging in.");

    let bad = MockBackend {
        sign_in: Err(ApiError::Identity(IdentityError::InvalidCredential)),
        legacy: Err(status("Invalid credentials")),
        ..Default::default()
    };
    let err = block_on(sign_in(&bad, "a@b.c", "nope")).unwrap_err();
    assert_eq!(err, AuthFailure::general("Invalid email or password."));
}

#[test]
fn test_unverified_sign_in_sends_mail_and_waits() {
    let backend = MockBackend { sign_in: Ok(user(false)), ..Default::default() };
    let outcome = block_on(sign_in(&backend, "student@campus.edu", "secret1")).unwrap();
    match outcome {
        AuthOutcome::VerificationSent(pending) => assert_eq!(pending.email, "student@campus.edu"),
        other => panic!("expected verification, got {:?}", other),
    }
    assert!(backend.called("send_verification"));
    assert!(!backend.called("exchange"));
}

// =============================================================
// Registration
// =============================================================

#[test]
fn test_registration_validates_before_any_call() {
    let backend = MockBackend::default();
    let mismatch = Registration {
        name: "Asha".into(),
        email: "a@b.c".into(),
        password: "secret1".into(),
        confirm_password: "secret2".into(),
    };
    let err = block_on(register(&backend, &mismatch)).unwrap_err();
    assert_eq!(err.field, AuthField::ConfirmPassword);
    assert_eq!(err.message, "Passwords do not match");

    let short = Registration { password: "abc".into(), confirm_password: "abc".into(), ..mismatch };
    let err = block_on(register(&backend, &short)).unwrap_err();
    assert_eq!(err.field, AuthField::Password);
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn test_registration_mirror_failure_is_swallowed() {
    let backend = MockBackend { mirror_fails: true, ..Default::default() };
    let reg = Registration {
        name: "Asha".into(),
        email: "a@b.c".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    };
    let pending = block_on(register(&backend, &reg)).unwrap();
    assert_eq!(pending.name.as_deref(), Some("Asha"));
    assert_eq!(
        *backend.calls.borrow(),
        vec!["identity_sign_up", "legacy_register", "send_verification"]
    );
}

#[test]
fn test_registration_reports_identity_message() {
    let backend = MockBackend {
        sign_up: Err(ApiError::Identity(IdentityError::EmailAlreadyInUse)),
        ..Default::default()
    };
    let reg = Registration {
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        ..Default::default()
    };
    let err = block_on(register(&backend, &reg)).unwrap_err();
    assert_eq!(err.message, "Email already in use. Please login.");
}

// =============================================================
// Verification
// =============================================================

fn pending() -> PendingVerification {
    PendingVerification {
        user: user(false),
        email: "a@b.c".into(),
        password: "secret1".into(),
        name: None,
    }
}

#[test]
fn test_unverified_check_keeps_waiting() {
    let backend = MockBackend { verified: Ok(false), ..Default::default() };
    let err = block_on(check_verification(&backend, &mut pending())).unwrap_err();
    assert_eq!(err.message, "Email not verified yet. Please check your inbox and click the link.");
    assert!(!backend.called("exchange"));
}

#[test]
fn test_verified_check_exchanges_and_registers_push() {
    let backend = MockBackend::default();
    let token = block_on(check_verification(&backend, &mut pending())).unwrap();
    assert_eq!(token, "jwt-identity");
    assert!(backend.pushed.get());
}

#[test]
fn test_lookup_failure_signs_in_again() {
    let backend = MockBackend {
        verified: Err(ApiError::Network("offline".into())),
        ..Default::default()
    };
    let mut p = pending();
    block_on(check_verification(&backend, &mut p)).unwrap();
    assert!(backend.called("identity_sign_in"));
    assert!(p.user.email_verified);
}

#[test]
fn test_exchange_failure_prefers_server_message() {
    let backend = MockBackend {
        exchange: Err(ApiError::Status { status: 500, code: None, message: None }),
        ..Default::default()
    };
    let err = block_on(check_verification(&backend, &mut pending())).unwrap_err();
    assert_eq!(err.message, "Login failed after verification.");
    assert!(!backend.pushed.get());
}

// =============================================================
// Cooldown
// =============================================================

#[test]
fn test_cooldown_counts_down_to_ready() {
    let mut cd = Cooldown::default();
    assert!(cd.is_ready());
    assert_eq!(cd.label(), "Resend verification email");

    cd.start();
    assert_eq!(cd.remaining(), 60);
    assert_eq!(cd.label(), "Resend in 60s");
    for _ in 0..59 {
        cd.tick();
    }
    assert!(!cd.is_ready());
    assert_eq!(cd.tick(), 0);
    assert_eq!(cd.tick(), 0);
    assert!(cd.is_ready());
}
