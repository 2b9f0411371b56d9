//! Session Token Storage
//!
//! The bearer token lives in localStorage under `token`; its presence is the login signal.
//! Every change dispatches an `authChange` window event so listeners can re-check.

use crate::error::ApiError;

const TOKEN_KEY: &str = "token";
pub const AUTH_CHANGE_EVENT: &str = "authChange";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Current bearer token, if any
pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

pub fn is_authenticated() -> bool {
    token().is_some()
}

/// Persist a token and notify listeners
pub fn store_token(token: &str) -> Result<(), ApiError> {
    let storage = storage().ok_or_else(|| ApiError::Browser("localStorage unavailable".into()))?;
    storage.set_item(TOKEN_KEY, token)?;
    log::info!("[SESSION] token stored");
    notify_auth_change();
    Ok(())
}

/// Remove the token and notify listeners
pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
    log::info!("[SESSION] token cleared");
    notify_auth_change();
}

fn notify_auth_change() {
    let Some(window) = web_sys::window() else { return };
    match web_sys::CustomEvent::new(AUTH_CHANGE_EVENT) {
        Ok(ev) => {
            let _ = window.dispatch_event(&ev);
        }
        Err(e) => log::warn!("[SESSION] could not create {} event: {:?}", AUTH_CHANGE_EVENT, e),
    }
}
