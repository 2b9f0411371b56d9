//! Campus Reconnect Frontend Entry Point

mod api;
mod app;
mod auth_flow;
mod components;
mod config;
mod context;
mod error;
mod filters;
mod images;
mod models;
mod pages;
mod report;
mod session;
mod speech;
mod store;
mod templates;
mod validation;
mod voice;

use app::App;
use leptos::prelude::*;

use crate::config::AppConfig;
use crate::context::AuthContext;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
    }

    mount_to_body(|| {
        let config = AppConfig::from_build_env();
        log::info!("[APP] backend at {}", config.backend_url);
        provide_context(config);
        provide_context(AuthContext::new());
        view! { <App /> }
    });
}
