//! Navbar Component
//!
//! Brand link plus session-aware navigation.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::context::use_auth;
use crate::store::{store_clear_session, use_app_store};

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let store = use_app_store();
    let navigate = use_navigate();

    let go = {
        let navigate = navigate.clone();
        move |path: &'static str| {
            let navigate = navigate.clone();
            move |_| navigate(path, NavigateOptions::default())
        }
    };

    let on_logout = {
        let navigate = navigate.clone();
        move |_| {
            auth.logout();
            store_clear_session(&store);
            navigate("/", NavigateOptions::default());
        }
    };

    let on_login = {
        let navigate = navigate.clone();
        move |_| {
            auth.modal_open.set(true);
            navigate("/", NavigateOptions::default());
        }
    };

    view! {
        <nav class="navbar">
            <div class="nav-brand" on:click=go("/")>
                <h3>"Campus Reconnect"</h3>
            </div>
            <div class="nav-links">
                <Show
                    when=move || auth.authenticated.get()
                    fallback=move || view! {
                        <button class="nav-link" on:click=on_login.clone()>"Login"</button>
                    }
                >
                    <button class="nav-link" on:click=go("/dashboard")>"Dashboard"</button>
                    <button class="nav-link" on:click=go("/feed")>"Feed"</button>
                    <button class="nav-link" on:click=go("/report")>"Report"</button>
                    <button class="nav-link logout" on:click=on_logout.clone()>"Logout"</button>
                    <button class="nav-link" on:click=go("/profile")>"Edit Profile"</button>
                </Show>
            </div>
        </nav>
    }
}
