//! Profile Page
//!
//! View and edit the signed-in user's profile, change password, manage the picture.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::{use_auth, use_config};
use crate::error::ApiError;
use crate::models::{Profile, ProfileUpdate};
use crate::store::{store_clear_session, store_set_profile, use_app_store, AppStateStoreFields};
use crate::validation::{self, PasswordChange, YEAR_OPTIONS};

const SUCCESS_CLEAR_MS: u32 = 3000;

/// Success banner. Each show takes a new serial; a timer only clears its own.
#[derive(Debug, Clone, Default, PartialEq)]
struct Flash {
    message: Option<String>,
    serial: u32,
}

impl Flash {
    fn show(&mut self, message: &str) -> u32 {
        self.serial = self.serial.wrapping_add(1);
        self.message = Some(message.to_string());
        self.serial
    }

    fn expire(&mut self, serial: u32) {
        if self.serial == serial {
            self.message = None;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ProfileField {
    Name,
    Email,
    Phone,
    Year,
    UniversityId,
    Department,
}

impl ProfileField {
    fn slot(self, update: &mut ProfileUpdate) -> &mut String {
        match self {
            ProfileField::Name => &mut update.name,
            ProfileField::Email => &mut update.email,
            ProfileField::Phone => &mut update.phone_number,
            ProfileField::Year => &mut update.year_of_study,
            ProfileField::UniversityId => &mut update.university_id,
            ProfileField::Department => &mut update.department,
        }
    }

    fn get(self, update: &ProfileUpdate) -> &str {
        match self {
            ProfileField::Name => &update.name,
            ProfileField::Email => &update.email,
            ProfileField::Phone => &update.phone_number,
            ProfileField::Year => &update.year_of_study,
            ProfileField::UniversityId => &update.university_id,
            ProfileField::Department => &update.department,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PasswordField {
    Old,
    New,
    Confirm,
}

impl PasswordField {
    fn slot(self, change: &mut PasswordChange) -> &mut String {
        match self {
            PasswordField::Old => &mut change.old_password,
            PasswordField::New => &mut change.new_password,
            PasswordField::Confirm => &mut change.confirm_password,
        }
    }
}

fn first_letter(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let config = use_config();
    let store = use_app_store();
    let navigate = use_navigate();

    let (loading, set_loading) = signal(true);
    let editing = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let draft = RwSignal::new(ProfileUpdate::default());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(Flash::default());
    let uploading = RwSignal::new(false);
    let show_password = RwSignal::new(false);
    let password = RwSignal::new(PasswordChange::default());
    let password_error = RwSignal::new(None::<String>);
    let file_ref = NodeRef::<leptos::html::Input>::new();

    // Banner goes away on its own
    let flash = move |message: &str| {
        let Some(serial) = success.try_update(|f| f.show(message)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(SUCCESS_CLEAR_MS).await;
            success.try_update(|f| f.expire(serial));
        });
    };

    // 401 anywhere on this page ends the session
    let handle_error = {
        let navigate = navigate.clone();
        move |e: ApiError| {
            if e.is_unauthorized() {
                log::warn!("[PROFILE] session expired");
                auth.logout();
                store_clear_session(&store);
                navigate("/", NavigateOptions::default());
            } else {
                log::error!("[PROFILE] {}", e);
                error.set(Some(e.to_string()));
            }
        }
    };

    let apply_profile = move |p: Profile| {
        draft.set(ProfileUpdate::from(&p));
        store_set_profile(&store, Some(p));
    };

    {
        let config = config.clone();
        let handle_error = handle_error.clone();
        spawn_local(async move {
            match api::get_profile(&config).await {
                Ok(p) => apply_profile(p),
                Err(e) => handle_error(e),
            }
            set_loading.set(false);
        });
    }

    let cancel_edit = move |_| {
        if let Some(p) = store.profile().get_untracked() {
            draft.set(ProfileUpdate::from(&p));
        }
        error.set(None);
        editing.set(false);
    };

    let save = {
        let config = config.clone();
        let handle_error = handle_error.clone();
        move |_| {
            let update = draft.get_untracked();
            if let Err(e) = validation::validate_profile(&update) {
                error.set(Some(e.to_string()));
                return;
            }
            error.set(None);
            saving.set(true);
            let config = config.clone();
            let handle_error = handle_error.clone();
            spawn_local(async move {
                match api::update_profile(&config, &update).await {
                    Ok(p) => {
                        apply_profile(p);
                        editing.set(false);
                        flash("Profile updated successfully!");
                    }
                    Err(e) => handle_error(e),
                }
                saving.set(false);
            });
        }
    };

    let save = StoredValue::new_local(save);

    let submit_password = {
        let config = config.clone();
        let handle_error = handle_error.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let change = password.get_untracked();
            if let Err(e) = change.validate() {
                password_error.set(Some(e.to_string()));
                return;
            }
            password_error.set(None);
            let config = config.clone();
            let handle_error = handle_error.clone();
            spawn_local(async move {
                match api::change_password(&config, &change.old_password, &change.new_password).await {
                    Ok(()) => {
                        show_password.set(false);
                        password.set(PasswordChange::default());
                        flash("Password changed successfully!");
                    }
                    Err(e) if e.is_unauthorized() => handle_error(e),
                    Err(e) => password_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let on_picture = {
        let config = config.clone();
        let handle_error = handle_error.clone();
        move |ev: web_sys::Event| {
            let Some(file) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                return;
            };
            if let Err(e) = validation::validate_picture(&file.type_(), file.size() as u64) {
                error.set(Some(e.to_string()));
                return;
            }
            error.set(None);
            uploading.set(true);
            let config = config.clone();
            let handle_error = handle_error.clone();
            spawn_local(async move {
                match api::upload_picture(&config, &file).await {
                    Ok(p) => {
                        apply_profile(p);
                        flash("Profile picture updated!");
                    }
                    Err(e) => handle_error(e),
                }
                uploading.set(false);
            });
        }
    };

    let delete_picture = {
        let config = config.clone();
        let handle_error = handle_error.clone();
        Callback::new(move |_: ()| {
            let config = config.clone();
            let handle_error = handle_error.clone();
            uploading.set(true);
            spawn_local(async move {
                match api::delete_picture(&config).await {
                    Ok(p) => {
                        apply_profile(p);
                        flash("Profile picture removed");
                    }
                    Err(e) => handle_error(e),
                }
                uploading.set(false);
            });
        })
    };

    let on_logout = move |_| {
        auth.logout();
        store_clear_session(&store);
        navigate("/", NavigateOptions::default());
    };

    let text_field = move |label: &'static str, field: ProfileField, input_type: &'static str| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type=input_type
                    disabled=move || !editing.get()
                    prop:value=move || draft.with(|d| field.get(d).to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| *field.slot(d) = value);
                    }
                />
            </div>
        }
    };

    let password_input = move |placeholder: &'static str, field: PasswordField| {
        view! {
            <input
                type="password"
                placeholder=placeholder
                required=true
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    password.update(|p| *field.slot(p) = value);
                }
            />
        }
    };

    let picture = Memo::new(move |_| {
        store.profile().with(|p| {
            p.as_ref().and_then(|p| {
                p.profile_picture_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .map(|u| config.resolve_media(u))
            })
        })
    });
    let display_name = move || store.profile().with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default());

    view! {
        <div class="profile-page">
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading profile..."</p> }
            >
                {move || success.with(|f| f.message.clone()).map(|m| view! { <div class="success-banner">{m}</div> })}
                {move || error.get().map(|e| view! { <div class="error-text">{e}</div> })}

                <div class="profile-card">
                    <div class="profile-picture-section">
                        {move || match picture.get() {
                            Some(src) => view! { <img class="profile-picture" src=src alt="Profile" /> }.into_any(),
                            None => view! {
                                <div class="profile-picture placeholder">{first_letter(&display_name())}</div>
                            }
                            .into_any(),
                        }}
                        <input
                            node_ref=file_ref
                            type="file"
                            accept="image/*"
                            style="display: none"
                            on:change=on_picture.clone()
                        />
                        <div class="picture-actions">
                            <button
                                class="btn btn-sm"
                                disabled=move || uploading.get()
                                on:click=move |_| {
                                    if let Some(input) = file_ref.get() {
                                        input.click();
                                    }
                                }
                            >
                                {move || if uploading.get() { "Uploading..." } else { "📷 Change Photo" }}
                            </button>
                            <Show when=move || picture.with(|p| p.is_some())>
                                <DeleteConfirmButton
                                    button_class="btn btn-sm btn-danger picture-delete-btn"
                                    label="Remove"
                                    on_confirm=delete_picture
                                    busy=Signal::derive(move || uploading.get())
                                />
                            </Show>
                        </div>
                        <h2>{display_name}</h2>
                        <p class="profile-role">
                            {move || store.profile().with(|p| p.as_ref().and_then(|p| p.role.clone()).unwrap_or_default())}
                        </p>
                    </div>

                    <div class="profile-details">
                        {text_field("Full Name", ProfileField::Name, "text")}
                        {text_field("Email", ProfileField::Email, "email")}
                        {text_field("Phone Number", ProfileField::Phone, "tel")}
                        <div class="form-group">
                            <label>"Year of Study"</label>
                            <select
                                disabled=move || !editing.get()
                                prop:value=move || draft.with(|d| ProfileField::Year.get(d).to_string())
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    draft.update(|d| *ProfileField::Year.slot(d) = value);
                                }
                            >
                                <option value="">"Select year"</option>
                                {YEAR_OPTIONS.iter().map(|y| view! { <option value=*y>{*y}</option> }).collect_view()}
                            </select>
                        </div>
                        {text_field("University ID", ProfileField::UniversityId, "text")}
                        {text_field("Department", ProfileField::Department, "text")}

                        <div class="profile-actions">
                            <Show
                                when=move || editing.get()
                                fallback=move || view! {
                                    <button class="btn btn-primary" on:click=move |_| editing.set(true)>
                                        "✏ Edit Profile"
                                    </button>
                                }
                            >
                                <button class="btn btn-primary" disabled=move || saving.get() on:click=move |ev: web_sys::MouseEvent| save.with_value(|f| f(ev))>
                                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                                </button>
                                <button class="btn btn-secondary" on:click=cancel_edit>"Cancel"</button>
                            </Show>
                            <button class="btn btn-secondary" on:click=move |_| {
                                password.set(PasswordChange::default());
                                password_error.set(None);
                                show_password.set(true);
                            }>
                                "🔒 Change Password"
                            </button>
                            <button class="btn btn-danger" on:click=on_logout.clone()>"Logout"</button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || show_password.get()>
                <div class="modal-overlay">
                    <div class="modal">
                        <h3>"Change Password"</h3>
                        <form on:submit=submit_password.clone()>
                            {password_input("Current Password", PasswordField::Old)}
                            {password_input("New Password", PasswordField::New)}
                            {password_input("Confirm New Password", PasswordField::Confirm)}
                            {move || password_error.get().map(|e| view! { <span class="error-text">{e}</span> })}
                            <div class="modal-actions">
                                <button type="submit" class="btn btn-primary">"Update Password"</button>
                                <button type="button" class="btn btn-secondary" on:click=move |_| show_password.set(false)>
                                    "Cancel"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </Show>
        </div>
    }
}
