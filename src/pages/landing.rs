//! Landing Page
//!
//! Public hero; login opens the auth modal, signed-in users jump to the dashboard.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::Navbar;
use crate::context::use_auth;

const STEPS: &[(&str, &str, &str)] = &[
    ("📝", "Report", "Describe what you lost or found, by typing or by voice."),
    ("🤖", "Match", "Photos are analysed to suggest a category, colors and brands."),
    ("🤝", "Reconnect", "Contact the reporter straight from the feed."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let get_started = {
        let navigate = navigate.clone();
        move |_| {
            if auth.authenticated.get_untracked() {
                navigate("/dashboard", NavigateOptions::default());
            } else {
                auth.modal_open.set(true);
            }
        }
    };

    let browse = move |_| navigate("/gallery", NavigateOptions::default());

    view! {
        <div class="landing-page">
            <Navbar />
            <section class="hero">
                <h1>"Lost something on campus?"</h1>
                <p class="hero-subtitle">
                    "Campus Reconnect helps students report lost and found items and get them back to their owners."
                </p>
                <div class="hero-actions">
                    <button class="btn btn-primary btn-lg" on:click=get_started>
                        {move || if auth.authenticated.get() { "Go to Dashboard" } else { "Get Started" }}
                    </button>
                    <button class="btn btn-secondary btn-lg" on:click=browse>
                        "Browse Items"
                    </button>
                </div>
            </section>
            <section class="how-it-works">
                <h2>"How it works"</h2>
                <div class="steps-grid">
                    {STEPS.iter().map(|(icon, title, text)| view! {
                        <div class="step-card">
                            <div class="step-icon">{*icon}</div>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }).collect_view()}
                </div>
            </section>
        </div>
    }
}
