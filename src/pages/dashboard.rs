//! Dashboard Page
//!
//! The signed-in user's own reports with counters and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api;
use crate::components::ItemCard;
use crate::context::use_config;
use crate::store::{store_remove_item, store_set_my_items, use_app_store, AppStateStoreFields, DashboardStats};

const DELETE_FAILED: &str = "Failed to delete item. Please try again.";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = use_config();
    let store = use_app_store();
    let navigate = use_navigate();

    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    // Load on mount
    {
        let config = config.clone();
        spawn_local(async move {
            match api::list_my_items(&config).await {
                Ok(items) => {
                    log::debug!("[DASHBOARD] loaded {} item(s)", items.len());
                    store_set_my_items(&store, items);
                }
                Err(e) => {
                    log::error!("[DASHBOARD] load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    let on_delete = Callback::new(move |id: u64| {
        let config = config.clone();
        spawn_local(async move {
            match api::delete_item(&config, id).await {
                Ok(()) => {
                    log::info!("[DASHBOARD] deleted item {}", id);
                    store_remove_item(&store, id);
                }
                Err(e) => {
                    log::error!("[DASHBOARD] delete {} failed: {}", id, e);
                    if let Some(w) = web_sys::window() {
                        let _ = w.alert_with_message(DELETE_FAILED);
                    }
                }
            }
        });
    });

    let stats = Memo::new(move |_| store.my_items().with(|items| DashboardStats::from_items(items)));

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"My Dashboard"</h1>
                <button
                    class="btn btn-primary"
                    on:click=move |_| navigate("/report", NavigateOptions::default())
                >
                    "+ Report Item"
                </button>
            </header>

            <div class="stats-grid">
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().reported}</span>
                    <span class="stat-label">"Items Reported"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().active}</span>
                    <span class="stat-label">"Active"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().reunited}</span>
                    <span class="stat-label">"Reunited"</span>
                </div>
            </div>

            <h2>"My Reports"</h2>
            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading your items..."</p> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <p class="error-text">{e}</p> }.into_any();
                }
                let items = store.my_items().get();
                if items.is_empty() {
                    view! { <p class="empty-state">"You haven't reported any items yet."</p> }.into_any()
                } else {
                    view! {
                        <div class="items-grid">
                            {items.into_iter().map(|item| view! { <ItemCard item=item on_delete=on_delete /> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
