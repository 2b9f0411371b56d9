//! Auth Modal Component
//!
//! Login / sign-up tabs and the email verification screen.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::auth_flow::{
    self, AuthField, AuthFailure, AuthOutcome, Cooldown, HttpAuthBackend, PendingVerification, Registration,
};
use crate::context::{use_auth, use_config};

#[component]
pub fn AuthModal() -> impl IntoView {
    let auth = use_auth();
    let config = use_config();
    let navigate = use_navigate();

    let is_login = RwSignal::new(true);
    let show_password = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let checking = RwSignal::new(false);
    let failure = RwSignal::new(None::<AuthFailure>);
    let pending = RwSignal::new(None::<PendingVerification>);
    let cooldown = RwSignal::new(Cooldown::default());

    // One ticker for the modal's lifetime; ticking at zero is a no-op
    let ticker = StoredValue::new_local(Some(Interval::new(1000, move || {
        if !cooldown.get_untracked().is_ready() {
            cooldown.update(|c| {
                c.tick();
            });
        }
    })));
    on_cleanup(move || ticker.dispose());

    let field_error = move |field: AuthField| {
        failure
            .get()
            .filter(|f| f.field == field)
            .map(|f| f.message)
    };

    // Persist the token, close, go to the dashboard
    let finish = {
        let navigate = navigate.clone();
        move |token: String| {
            if let Err(e) = auth.login(&token) {
                log::error!("[AUTH] could not persist session: {}", e);
                failure.set(Some(AuthFailure {
                    field: AuthField::General,
                    message: e.to_string(),
                }));
                return;
            }
            auth.modal_open.set(false);
            pending.set(None);
            navigate("/dashboard", NavigateOptions::default());
        }
    };

    let on_submit = {
        let config = config.clone();
        let finish = finish.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if loading.get_untracked() {
                return;
            }
            loading.set(true);
            failure.set(None);
            let backend = HttpAuthBackend { config: config.clone() };
            let finish = finish.clone();
            let login_mode = is_login.get_untracked();
            let reg = Registration {
                name: name.get_untracked(),
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
                confirm_password: confirm_password.get_untracked(),
            };
            spawn_local(async move {
                let outcome = if login_mode {
                    auth_flow::sign_in(&backend, &reg.email, &reg.password).await
                } else {
                    auth_flow::register(&backend, &reg).await.map(AuthOutcome::VerificationSent)
                };
                loading.set(false);
                match outcome {
                    Ok(AuthOutcome::LoggedIn(token)) => finish(token),
                    Ok(AuthOutcome::VerificationSent(p)) => {
                        cooldown.update(Cooldown::start);
                        pending.set(Some(p));
                    }
                    Err(f) => failure.set(Some(f)),
                }
            });
        }
    };

    let on_check = {
        let config = config.clone();
        let finish = finish.clone();
        move |_| {
            let Some(mut p) = pending.get_untracked() else { return };
            checking.set(true);
            failure.set(None);
            let backend = HttpAuthBackend { config: config.clone() };
            let finish = finish.clone();
            spawn_local(async move {
                let result = auth_flow::check_verification(&backend, &mut p).await;
                checking.set(false);
                match result {
                    Ok(token) => finish(token),
                    Err(f) => {
                        pending.set(Some(p));
                        failure.set(Some(f));
                    }
                }
            });
        }
    };

    let on_check = StoredValue::new_local(on_check);

    let on_resend = {
        let config = config.clone();
        move |_| {
            let Some(p) = pending.get_untracked() else { return };
            if !cooldown.get_untracked().is_ready() {
                return;
            }
            let backend = HttpAuthBackend { config: config.clone() };
            spawn_local(async move {
                match auth_flow::resend_verification(&backend, &p).await {
                    Ok(()) => cooldown.update(Cooldown::start),
                    Err(f) => failure.set(Some(f)),
                }
            });
        }
    };

    let on_resend = StoredValue::new_local(on_resend);

    let switch_tab = move |login: bool| {
        is_login.set(login);
        failure.set(None);
        pending.set(None);
    };

    let close = move |_| {
        auth.modal_open.set(false);
        failure.set(None);
        pending.set(None);
    };

    let text_input = move |signal: RwSignal<String>, field: AuthField| {
        move |ev: web_sys::Event| {
            signal.set(event_target_value(&ev));
            if failure.get_untracked().is_some_and(|f| f.field == field) {
                failure.set(None);
            }
        }
    };

    let general_error = move || {
        field_error(AuthField::General).map(|msg| view! { <div class="error-text general-error">{msg}</div> })
    };

    view! {
        <Show when=move || auth.modal_open.get()>
            <div class="auth-modal-overlay">
                <div class="auth-modal">
                    <button class="close-btn" on:click=close>"✕"</button>

                    <div class="auth-header">
                        <h2>"Welcome to Campus Reconnect"</h2>
                        <Show when=move || pending.get().is_none()>
                            <div class="auth-tabs">
                                <button
                                    class=move || if is_login.get() { "tab active" } else { "tab" }
                                    on:click=move |_| switch_tab(true)
                                >
                                    "Login"
                                </button>
                                <button
                                    class=move || if is_login.get() { "tab" } else { "tab active" }
                                    on:click=move |_| switch_tab(false)
                                >
                                    "Sign Up"
                                </button>
                            </div>
                        </Show>
                    </div>

                    <Show
                        when=move || pending.get().is_some()
                        fallback={
                            let on_submit = on_submit.clone();
                            move || view! {
                                <form class="auth-form" on:submit=on_submit.clone()>
                                    <Show when=move || !is_login.get()>
                                        <div class="form-group">
                                            <input
                                                type="text"
                                                placeholder="Full Name"
                                                required=true
                                                prop:value=move || name.get()
                                                on:input=text_input(name, AuthField::General)
                                            />
                                        </div>
                                    </Show>
                                    <div class="form-group">
                                        <input
                                            type="email"
                                            placeholder="Email Address"
                                            required=true
                                            prop:value=move || email.get()
                                            on:input=text_input(email, AuthField::General)
                                        />
                                    </div>
                                    <div class="form-group">
                                        <div class="password-input">
                                            <input
                                                type=move || if show_password.get() { "text" } else { "password" }
                                                placeholder="Password"
                                                required=true
                                                prop:value=move || password.get()
                                                on:input=text_input(password, AuthField::Password)
                                            />
                                            <button
                                                type="button"
                                                class="password-toggle"
                                                on:click=move |_| show_password.update(|v| *v = !*v)
                                            >
                                                {move || if show_password.get() { "🙈" } else { "👁" }}
                                            </button>
                                        </div>
                                        {move || field_error(AuthField::Password).map(|msg| view! { <span class="error-text">{msg}</span> })}
                                    </div>
                                    <Show when=move || !is_login.get()>
                                        <div class="form-group">
                                            <input
                                                type="password"
                                                placeholder="Confirm Password"
                                                required=true
                                                prop:value=move || confirm_password.get()
                                                on:input=text_input(confirm_password, AuthField::ConfirmPassword)
                                            />
                                            {move || field_error(AuthField::ConfirmPassword).map(|msg| view! { <span class="error-text">{msg}</span> })}
                                        </div>
                                    </Show>
                                    {general_error}
                                    <button type="submit" class="btn btn-primary auth-submit" disabled=move || loading.get()>
                                        {move || match (loading.get(), is_login.get()) {
                                            (true, _) => "Please wait...",
                                            (false, true) => "Login",
                                            (false, false) => "Create Account",
                                        }}
                                    </button>
                                </form>
                            }
                        }
                    >
                        <div class="verification-screen">
                            <div class="verification-icon">"✉"</div>
                            <h3>"Check your email!"</h3>
                            <p class="verification-sub">"We sent a verification link to"</p>
                            <p class="verification-email">
                                <strong>{move || pending.get().map(|p| p.email).unwrap_or_default()}</strong>
                            </p>
                            <p class="verification-instruction">
                                "Click the link in the email, then come back and press the button below."
                            </p>
                            {general_error}
                            <button
                                class="btn btn-primary auth-submit"
                                disabled=move || checking.get()
                                on:click=move |ev: web_sys::MouseEvent| on_check.with_value(|f| f(ev))
                            >
                                {move || if checking.get() { "Checking..." } else { "I've verified my email" }}
                            </button>
                            <button
                                class="resend-btn"
                                disabled=move || !cooldown.get().is_ready()
                                on:click=move |ev: web_sys::MouseEvent| on_resend.with_value(|f| f(ev))
                            >
                                {move || cooldown.get().label()}
                            </button>
                            <button
                                class="back-to-login-btn"
                                on:click=move |_| {
                                    pending.set(None);
                                    failure.set(None);
                                }
                            >
                                "← Back"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
