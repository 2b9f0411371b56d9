//! Item Detail Page
//!
//! One item with an image viewer, contact action and metadata.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::NavigateOptions;

use crate::api;
use crate::components::Navbar;
use crate::context::use_config;
use crate::filters::contact_mailto;
use crate::models::Item;

/// Fetch state for the detail view
#[derive(Debug, Clone, PartialEq)]
enum DetailState {
    Loading,
    Loaded(Box<Item>),
    NotFound,
    Failed(String),
}

#[component]
pub fn ItemDetailPage() -> impl IntoView {
    let config = use_config();
    let params = use_params_map();
    let navigate = use_navigate();

    let state = RwSignal::new(DetailState::Loading);
    let selected = RwSignal::new(0usize);

    // Refetch whenever the route param changes
    {
        let config = config.clone();
        Effect::new(move || {
            let raw = params.with(|p| p.get("id")).unwrap_or_default();
            let Ok(id) = raw.parse::<u64>() else {
                log::warn!("[DETAIL] bad item id {:?}", raw);
                state.set(DetailState::NotFound);
                return;
            };
            state.set(DetailState::Loading);
            selected.set(0);
            let config = config.clone();
            spawn_local(async move {
                let next = match api::get_item(&config, id).await {
                    Ok(item) => DetailState::Loaded(Box::new(item)),
                    Err(e) if e.status() == Some(404) => DetailState::NotFound,
                    Err(e) => {
                        log::error!("[DETAIL] load {} failed: {}", id, e);
                        DetailState::Failed(e.to_string())
                    }
                };
                state.set(next);
            });
        });
    }

    let back = move |_| navigate("/feed", NavigateOptions::default());

    let render_item = move |item: Item| {
        let images: Vec<String> = item.image_refs().iter().map(|r| config.resolve_media(r)).collect();
        let status = item.status.as_str();
        let mailto = contact_mailto(&item);
        let thumbs = images.clone();
        view! {
            <div class="item-detail">
                <div class="detail-images">
                    {if images.is_empty() {
                        view! { <div class="item-image-placeholder large">"📦"</div> }.into_any()
                    } else {
                        view! {
                            <img
                                class="detail-main-image"
                                src=move || images.get(selected.get()).cloned().unwrap_or_default()
                                alt=item.title.clone()
                            />
                        }
                        .into_any()
                    }}
                    {(thumbs.len() > 1).then(|| view! {
                        <div class="detail-thumbnails">
                            {thumbs.into_iter().enumerate().map(|(i, src)| view! {
                                <img
                                    class=move || if selected.get() == i { "thumbnail active" } else { "thumbnail" }
                                    src=src
                                    on:click=move |_| selected.set(i)
                                />
                            }).collect_view()}
                        </div>
                    })}
                </div>
                <div class="detail-info">
                    <div class="item-header">
                        <h1>{item.title.clone()}</h1>
                        <span class=format!("status-badge {}", status)>{status}</span>
                    </div>
                    <p class="item-category">{item.category.clone()}</p>
                    <p class="detail-description">{item.description.clone()}</p>
                    <ul class="detail-meta">
                        <li>"📍 " {item.location.clone()}</li>
                        <li>"🕒 " {item.display_date()}</li>
                        <li>"👤 " {item.reporter_name()}</li>
                    </ul>
                    {(!item.ai_labels.is_empty()).then(|| view! {
                        <div class="ai-labels">
                            {item.ai_labels.iter().map(|l| view! { <span class="ai-label">{l.clone()}</span> }).collect_view()}
                        </div>
                    })}
                    {mailto.map(|href| view! {
                        <a class="btn btn-primary" href=href>"✉ Contact Reporter"</a>
                    })}
                </div>
            </div>
        }
    };

    view! {
        <div class="item-detail-page">
            <Navbar />
            {move || match state.get() {
                DetailState::Loading => view! { <p class="loading">"Loading item..."</p> }.into_any(),
                DetailState::Loaded(item) => render_item(*item).into_any(),
                DetailState::NotFound => view! {
                    <div class="not-found">
                        <h2>"Item not found"</h2>
                        <button class="btn btn-primary" on:click=back.clone()>"Back to Feed"</button>
                    </div>
                }
                .into_any(),
                DetailState::Failed(e) => view! { <p class="error-text">{e}</p> }.into_any(),
            }}
        </div>
    }
}
