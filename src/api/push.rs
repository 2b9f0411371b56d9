//! Push Messaging
//!
//! Device token registration through the messaging SDK shim in `index.html`.
//! Every step is optional; failures are logged and swallowed.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::AppConfig;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "lostfoundPush"], js_name = getToken)]
    async fn get_token(vapid_key: &str) -> Result<JsValue, JsValue>;
}

/// Ask for notification permission; true when granted
async fn request_permission() -> bool {
    let Ok(promise) = web_sys::Notification::request_permission() else {
        return false;
    };
    match JsFuture::from(promise).await {
        Ok(value) => value.as_string().as_deref() == Some("granted"),
        Err(_) => false,
    }
}

/// Register the device push token with the backend, best effort
pub async fn register_device(cfg: &AppConfig, jwt: &str) {
    if cfg.vapid_key.is_empty() {
        log::debug!("[PUSH] no VAPID key configured, skipping");
        return;
    }
    if !request_permission().await {
        log::debug!("[PUSH] notification permission not granted");
        return;
    }
    let token = match get_token(&cfg.vapid_key).await {
        Ok(v) => v.as_string().unwrap_or_default(),
        Err(e) => {
            log::warn!("[PUSH] token request failed: {:?}", e);
            return;
        }
    };
    if token.is_empty() {
        return;
    }
    if let Err(e) = super::update_push_token(cfg, jwt, &token).await {
        log::warn!("[PUSH] backend registration failed: {}", e);
    }
}
