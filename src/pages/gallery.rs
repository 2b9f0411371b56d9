//! Gallery Page
//!
//! Public grid of all items with client-side search and filters.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ItemCard, Navbar};
use crate::context::use_config;
use crate::filters::GalleryFilter;
use crate::models::{ItemStatus, CATEGORIES};
use crate::store::{store_set_feed, use_app_store, AppStateStoreFields};

#[component]
pub fn GalleryPage() -> impl IntoView {
    let config = use_config();
    let store = use_app_store();

    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let filter = RwSignal::new(GalleryFilter::default());

    spawn_local(async move {
        match api::list_items(&config).await {
            Ok(items) => store_set_feed(&store, items),
            Err(e) => {
                log::error!("[GALLERY] load failed: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
        set_loading.set(false);
    });

    let visible = Memo::new(move |_| filter.with(|f| store.feed_items().with(|items| f.apply(items))));

    view! {
        <div class="gallery-page">
            <Navbar />
            <div class="gallery-header">
                <h1>"Lost & Found Gallery"</h1>
                <p>"Browse everything reported on campus"</p>
            </div>

            <div class="gallery-filters">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search by title or location..."
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                />
                <select
                    class="filter-select"
                    on:change=move |ev| filter.update(|f| f.category = event_target_value(&ev))
                >
                    <option value="">"All Categories"</option>
                    {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                </select>
                <select
                    class="filter-select"
                    on:change=move |ev| filter.update(|f| f.status = ItemStatus::parse(&event_target_value(&ev)))
                >
                    <option value="">"All Status"</option>
                    <option value="lost">"Lost"</option>
                    <option value="found">"Found"</option>
                </select>
            </div>

            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading items..."</p> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <p class="error-text">{e}</p> }.into_any();
                }
                let items = visible.get();
                view! {
                    <p class="results-count">{format!("{} items found", items.len())}</p>
                    <div class="items-grid">
                        {items.into_iter().map(|item| view! { <ItemCard item=item /> }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
