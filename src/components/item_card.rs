//! Item Card Component
//!
//! Grid card for one item; click opens the detail page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::context::use_config;
use crate::models::Item;
use super::DeleteConfirmButton;

#[component]
pub fn ItemCard(
    item: Item,
    /// Shows an inline-confirmed delete action when set
    #[prop(optional, into)]
    on_delete: Option<Callback<u64>>,
) -> impl IntoView {
    let config = use_config();
    let navigate = use_navigate();
    let id = item.id;
    let image = item.primary_image().map(|r| config.resolve_media(&r));
    let status = item.status.as_str();

    view! {
        <div
            class="item-card"
            on:click=move |_| navigate(&format!("/item/{}", id), NavigateOptions::default())
        >
            <div class="item-image">
                {match image {
                    Some(src) => view! { <img src=src alt=item.title.clone() /> }.into_any(),
                    None => view! { <div class="item-image-placeholder">"📦"</div> }.into_any(),
                }}
                <div class="item-overlay">
                    <span class="view-details-btn">"View Details"</span>
                </div>
            </div>
            <div class="item-content">
                <div class="item-header">
                    <h3 class="item-title">{item.title.clone()}</h3>
                    <span class=format!("status-badge {}", status)>{status}</span>
                </div>
                <p class="item-category">{item.category.clone()}</p>
                <div class="item-meta">
                    <span class="meta-item">"📍 " {item.location.clone()}</span>
                    <span class="meta-item">"🕒 " {item.display_date()}</span>
                </div>
                {on_delete.map(|cb| view! {
                    <div class="item-actions" on:click=|ev| ev.stop_propagation()>
                        <DeleteConfirmButton
                            button_class="btn btn-sm btn-danger"
                            label="🗑️ Delete"
                            on_confirm=Callback::new(move |_| cb.run(id))
                        />
                    </div>
                })}
            </div>
        </div>
    }
}
