//! Quick Templates Component
//!
//! Template cards plus title/color/brand/location chips for the selected template.

use leptos::prelude::*;

use crate::templates::{self, push_unique, room_location, DetailChoice, Template, BLOCKS, CANTEENS, OTHER_PLACES, TEMPLATES};

/// Which custom chip list an "Add" input feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChipKind {
    Color,
    Brand,
    Location,
}

impl ChipKind {
    fn label(self) -> &'static str {
        match self {
            ChipKind::Color => "Color",
            ChipKind::Brand => "Brand",
            ChipKind::Location => "Location",
        }
    }
}

#[component]
pub fn QuickTemplates(
    #[prop(into)] on_select_template: Callback<&'static Template>,
    #[prop(into)] on_select_detail: Callback<DetailChoice>,
) -> impl IntoView {
    let selected = RwSignal::new(None::<&'static str>);
    let custom_colors = RwSignal::new(Vec::<String>::new());
    let custom_brands = RwSignal::new(Vec::<String>::new());
    let custom_locations = RwSignal::new(Vec::<String>::new());
    let adding = RwSignal::new(None::<ChipKind>);
    let new_value = RwSignal::new(String::new());
    let room_for = RwSignal::new(None::<&'static str>);
    let room = RwSignal::new(String::new());

    let custom_list = move |kind: ChipKind| match kind {
        ChipKind::Color => custom_colors,
        ChipKind::Brand => custom_brands,
        ChipKind::Location => custom_locations,
    };

    let commit_custom = move |kind: ChipKind| {
        let value = new_value.get_untracked();
        custom_list(kind).update(|list| {
            push_unique(list, &value);
        });
        adding.set(None);
        new_value.set(String::new());
    };

    let commit_room = move |block: &'static str| {
        if let Some(location) = room_location(block, &room.get_untracked()) {
            custom_locations.update(|list| {
                push_unique(list, &location);
            });
            on_select_detail.run(DetailChoice::Location(location));
        }
        room_for.set(None);
        room.set(String::new());
    };

    let chip = move |class: &'static str, text: String, choice: DetailChoice| {
        view! {
            <button
                type="button"
                class=format!("detail-tag {}", class)
                on:click=move |_| on_select_detail.run(choice.clone())
            >
                {text}
            </button>
        }
    };

    let add_button = move |kind: ChipKind| {
        view! {
            <div class="add-option-wrapper">
                <button
                    type="button"
                    class="add-option-btn"
                    title=format!("Add custom {}", kind.label())
                    on:click=move |_| {
                        adding.set(Some(kind));
                        new_value.set(String::new());
                    }
                >
                    "+ Add " {kind.label()}
                </button>
                <Show when=move || adding.get() == Some(kind)>
                    <div class="add-input-container">
                        <input
                            type="text"
                            class="add-option-input"
                            placeholder=format!("Enter {}...", kind.label())
                            prop:value=move || new_value.get()
                            on:input=move |ev| new_value.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                "Enter" => {
                                    ev.prevent_default();
                                    commit_custom(kind);
                                }
                                "Escape" => adding.set(None),
                                _ => {}
                            }
                        />
                        <button type="button" class="add-option-confirm" on:click=move |_| commit_custom(kind)>
                            "✓"
                        </button>
                    </div>
                </Show>
            </div>
        }
    };

    let selected_template = move || selected.get().and_then(templates::find);

    view! {
        <div class="quick-templates">
            <div class="templates-header">
                <h3>"⚡ Quick Templates"</h3>
                <span class="templates-count">{format!("{} templates", TEMPLATES.len())}</span>
            </div>
            <p class="templates-description">"Select a template to auto-fill common item details"</p>

            <div class="templates-grid">
                {TEMPLATES.iter().map(|t| {
                    let is_selected = move || selected.get() == Some(t.id);
                    view! {
                        <div
                            class=move || if is_selected() { "template-card selected" } else { "template-card" }
                            on:click=move |_| {
                                selected.set(Some(t.id));
                                on_select_template.run(t);
                            }
                        >
                            <div class="template-icon">{t.icon}</div>
                            <div class="template-info">
                                <h4>{t.name}</h4>
                                <span class="template-category">{t.category}</span>
                            </div>
                            <Show when=is_selected>
                                <div class="selected-check">"✓"</div>
                            </Show>
                        </div>
                    }
                }).collect_view()}
            </div>

            {move || selected_template().map(|t| view! {
                <div class="template-details">
                    <h4>"Template Details - Click to add to your report"</h4>

                    <div class="detail-section">
                        <strong>"Title:"</strong>
                        <div class="detail-tags">
                            {templates::siblings(t)
                                .map(|s| chip("title-tag", s.name.to_string(), DetailChoice::Title(s.name.to_string())))
                                .collect_view()}
                        </div>
                    </div>

                    <div class="detail-section">
                        <strong>"Colors:"</strong>
                        <div class="detail-tags">
                            {t.colors.iter().map(|c| chip("color-tag", c.to_string(), DetailChoice::Color(c.to_string()))).collect_view()}
                            {move || custom_colors.get().into_iter().map(|c| chip("color-tag custom-tag", c.clone(), DetailChoice::Color(c))).collect_view()}
                            {add_button(ChipKind::Color)}
                        </div>
                    </div>

                    <div class="detail-section">
                        <strong>"Brands:"</strong>
                        <div class="detail-tags">
                            {t.brands.iter().map(|b| chip("brand-tag", b.to_string(), DetailChoice::Brand(b.to_string()))).collect_view()}
                            {move || custom_brands.get().into_iter().map(|b| chip("brand-tag custom-tag", b.clone(), DetailChoice::Brand(b))).collect_view()}
                            {add_button(ChipKind::Brand)}
                        </div>
                    </div>

                    <div class="detail-section">
                        <strong>"Location:"</strong>
                        <div class="detail-tags">
                            {BLOCKS.iter().map(|&block| view! {
                                <div class="block-location-wrapper">
                                    <button
                                        type="button"
                                        class="detail-tag location-tag"
                                        on:click=move |_| {
                                            room_for.set(Some(block));
                                            room.set(String::new());
                                        }
                                    >
                                        {block}
                                    </button>
                                    <Show when=move || room_for.get() == Some(block)>
                                        <div class="room-input-container">
                                            <input
                                                type="text"
                                                class="room-input"
                                                placeholder="Room No."
                                                prop:value=move || room.get()
                                                on:input=move |ev| room.set(event_target_value(&ev))
                                                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                                                    "Enter" => {
                                                        ev.prevent_default();
                                                        commit_room(block);
                                                    }
                                                    "Escape" => room_for.set(None),
                                                    _ => {}
                                                }
                                            />
                                            <button type="button" class="room-confirm-btn" on:click=move |_| commit_room(block)>
                                                "✓"
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                            }).collect_view()}
                            {CANTEENS.iter().chain(OTHER_PLACES).map(|p| chip("location-tag", p.to_string(), DetailChoice::Location(p.to_string()))).collect_view()}
                            {move || custom_locations.get().into_iter().map(|l| chip("location-tag custom-tag", l.clone(), DetailChoice::Location(l))).collect_view()}
                            {add_button(ChipKind::Location)}
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
