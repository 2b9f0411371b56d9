//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::session;

/// Process-wide session flag, refreshed on every `authChange` event
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Whether a session token is present - read
    pub authenticated: ReadSignal<bool>,
    /// Whether a session token is present - write
    set_authenticated: WriteSignal<bool>,
    /// Whether the landing page auth modal is open
    pub modal_open: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (authenticated, set_authenticated) = signal(session::is_authenticated());
        let ctx = Self {
            authenticated,
            set_authenticated,
            modal_open: RwSignal::new(false),
        };

        let handle = window_event_listener_untyped(session::AUTH_CHANGE_EVENT, move |_| {
            ctx.refresh();
        });
        on_cleanup(move || handle.remove());

        ctx
    }

    /// Re-read storage
    pub fn refresh(&self) {
        let now = session::is_authenticated();
        if self.authenticated.get_untracked() != now {
            log::debug!("[AUTH] session changed: authenticated={}", now);
            self.set_authenticated.set(now);
        }
    }

    /// Persist a fresh token (fires `authChange`)
    pub fn login(&self, token: &str) -> Result<(), crate::error::ApiError> {
        session::store_token(token)?;
        self.refresh();
        Ok(())
    }

    /// Drop the token (fires `authChange`)
    pub fn logout(&self) {
        session::clear_token();
        self.refresh();
    }
}

/// Get the auth context
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Get the app configuration
pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}
