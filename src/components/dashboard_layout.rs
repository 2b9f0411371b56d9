//! Dashboard Layout
//!
//! Wraps protected pages: redirects to `/` without a session, renders the
//! navbar above the routed page and a back-to-top button.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::context::use_auth;
use super::Navbar;

/// Scroll offset after which the back-to-top button appears
const BACK_TO_TOP_OFFSET: f64 = 300.0;

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    // Redirect when the session goes away, including logout from another tab
    Effect::new(move || {
        if !auth.authenticated.get() {
            log::debug!("[ROUTER] no session, redirecting to /");
            navigate("/", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    let (show_back_to_top, set_show_back_to_top) = signal(false);
    let handle = window_event_listener(leptos::ev::scroll, move |_| {
        let y = window().scroll_y().unwrap_or(0.0);
        set_show_back_to_top.set(y > BACK_TO_TOP_OFFSET);
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || auth.authenticated.get()>
            <div class="dashboard-layout">
                <Navbar />
                <main class="dashboard-main">
                    <Outlet />
                </main>
                <button
                    class=move || if show_back_to_top.get() { "back-to-top visible" } else { "back-to-top" }
                    aria-label="Back to top"
                    on:click=move |_| window().scroll_to_with_x_and_y(0.0, 0.0)
                >
                    "↑"
                </button>
            </div>
        </Show>
    }
}
