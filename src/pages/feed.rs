//! Feed Page
//!
//! Every reported item as a social-style card list with Lost/Found tabs.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api;
use crate::context::use_config;
use crate::filters::{contact_mailto, FeedFilter};
use crate::models::Item;
use crate::store::{store_set_feed, use_app_store, AppStateStoreFields};

fn open_mail(item: &Item) {
    let Some(href) = contact_mailto(item) else {
        log::warn!("[FEED] item {} has no contact address", item.id);
        return;
    };
    if let Err(e) = window().location().set_href(&href) {
        log::error!("[FEED] could not open mail client: {:?}", e);
    }
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let config = use_config();
    let store = use_app_store();
    let navigate = use_navigate();

    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let filter = RwSignal::new(FeedFilter::All);

    {
        let config = config.clone();
        spawn_local(async move {
            match api::list_items(&config).await {
                Ok(items) => {
                    log::debug!("[FEED] loaded {} item(s)", items.len());
                    store_set_feed(&store, items);
                }
                Err(e) => {
                    log::error!("[FEED] load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    let visible = Memo::new(move |_| {
        let f = filter.get();
        store.feed_items().with(|items| f.apply(items))
    });

    let card = move |item: Item| {
        let navigate = navigate.clone();
        let id = item.id;
        let initials = item.user.as_ref().map(|u| u.initials()).unwrap_or_else(|| "U".to_string());
        let image = item.primary_image().map(|r| config.resolve_media(&r));
        let status = item.status.as_str();
        let contact_item = item.clone();
        view! {
            <article class="feed-card">
                <header class="feed-card-header">
                    <div class="avatar">{initials}</div>
                    <div class="reporter">
                        <strong>{item.reporter_name()}</strong>
                        <span class="feed-date">{item.display_date()}</span>
                    </div>
                    <span class=format!("status-badge {}", status)>{status}</span>
                </header>
                {image.map(|src| view! { <img class="feed-image" src=src alt=item.title.clone() /> })}
                <div class="feed-card-body">
                    <h3>{item.title.clone()}</h3>
                    <p class="feed-description">{item.description.clone()}</p>
                    <div class="item-meta">
                        <span class="meta-item">"📍 " {item.location.clone()}</span>
                        <span class="meta-item">"🏷 " {item.category.clone()}</span>
                    </div>
                </div>
                <footer class="feed-card-actions">
                    <button class="btn btn-primary btn-sm" on:click=move |_| open_mail(&contact_item)>
                        "✉ Contact"
                    </button>
                    <button
                        class="btn btn-secondary btn-sm"
                        on:click=move |_| navigate(&format!("/item/{}", id), NavigateOptions::default())
                    >
                        "View"
                    </button>
                </footer>
            </article>
        }
    };

    view! {
        <div class="feed-page">
            <h1>"Community Feed"</h1>
            <div class="filter-tabs">
                {FeedFilter::ALL.into_iter().map(|f| view! {
                    <button
                        class=move || if filter.get() == f { "filter-tab active" } else { "filter-tab" }
                        on:click=move |_| filter.set(f)
                    >
                        {f.label()}
                        <span class="tab-count">
                            {move || store.feed_items().with(|items| f.count(items))}
                        </span>
                    </button>
                }).collect_view()}
            </div>
            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading feed..."</p> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <p class="error-text">{e}</p> }.into_any();
                }
                let items = visible.get();
                if items.is_empty() {
                    view! { <p class="empty-state">"No items to show."</p> }.into_any()
                } else {
                    view! {
                        <div class="feed-list">
                            {items.into_iter().map(card.clone()).collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
