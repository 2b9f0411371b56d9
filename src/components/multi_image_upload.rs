//! Multi Image Upload Component
//!
//! Drop zone and picker for up to five images with previews, a primary flag
//! and AI analysis of the first image.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_filedrop::{
    create_filedrop_signals, make_on_dragleave, make_on_dragover, make_on_drop, make_on_input_change, open_picker,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::context::use_config;
use crate::images::{FileMeta, ImageSet, MAX_IMAGES};

pub type ImageSignal = RwSignal<ImageSet<web_sys::File>, LocalStorage>;

fn file_meta(file: &web_sys::File) -> FileMeta {
    FileMeta {
        name: file.name(),
        mime: file.type_(),
        size: file.size() as u64,
    }
}

/// Read a file as a data URL and store it as the preview for `id`
fn load_preview(images: ImageSignal, id: u64, file: &web_sys::File) {
    let reader = match web_sys::FileReader::new() {
        Ok(r) => r,
        Err(e) => {
            log::warn!("[IMAGES] FileReader unavailable: {:?}", e);
            return;
        }
    };
    let target = reader.clone();
    let onload = Closure::once_into_js(move || {
        if let Some(url) = target.result().ok().and_then(|v| v.as_string()) {
            images.update(|set| set.set_preview(id, url));
        }
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    if let Err(e) = reader.read_as_data_url(file) {
        log::warn!("[IMAGES] could not read {}: {:?}", file.name(), e);
    }
}

#[component]
pub fn MultiImageUpload(images: ImageSignal) -> impl IntoView {
    let config = use_config();
    let drop = create_filedrop_signals();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move || drop.disabled_write.set(images.with(|s| s.is_full())));

    let on_files = move |files: Vec<web_sys::File>| {
        let batch: Vec<(web_sys::File, FileMeta)> = files
            .into_iter()
            .map(|f| {
                let meta = file_meta(&f);
                (f, meta)
            })
            .collect();
        let Some(Ok(added)) = images.try_update(|set| set.add_batch(batch)) else {
            return;
        };
        log::debug!("[IMAGES] added {} image(s)", added.ids.len());

        for id in &added.ids {
            let file = images.with_untracked(|set| {
                set.images().iter().find(|img| img.id == *id).map(|img| img.file.clone())
            });
            if let Some(file) = file {
                load_preview(images, *id, &file);
            }
        }

        if let Some(ticket) = added.analyze {
            let file = images.with_untracked(|set| {
                set.images()
                    .iter()
                    .find(|img| img.id == ticket.image_id)
                    .map(|img| img.file.clone())
            });
            let Some(file) = file else { return };
            let config = config.clone();
            spawn_local(async move {
                let outcome = api::analyze_image(&config, &file).await.map_err(|e| e.to_string());
                if let Err(e) = &outcome {
                    log::warn!("[IMAGES] analysis failed: {}", e);
                }
                images.update(|set| {
                    if let Some(result) = set.finish_analysis(ticket, outcome) {
                        log::info!("[IMAGES] suggested category: {}", result.category);
                    }
                });
            });
        }
    };

    let on_dragover = make_on_dragover(drop);
    let on_dragleave = make_on_dragleave(drop);
    let on_drop = make_on_drop(drop, on_files.clone());
    let on_change = make_on_input_change(drop, on_files);

    view! {
        <div class="multi-image-upload">
            <div
                class=move || {
                    let mut c = "upload-area".to_string();
                    if drop.over_read.get() { c.push_str(" drag-over"); }
                    if drop.disabled_read.get() { c.push_str(" disabled"); }
                    c
                }
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
                on:click=move |_| open_picker(&input_ref)
            >
                <input
                    node_ref=input_ref
                    type="file"
                    accept="image/*"
                    multiple=true
                    style="display: none"
                    on:change=on_change
                />
                <div class="upload-icon">"📷"</div>
                <p>
                    {move || if images.with(|s| s.is_full()) {
                        "Maximum images reached".to_string()
                    } else {
                        "Drag & drop images here, or click to browse".to_string()
                    }}
                </p>
                <span class="upload-hint">
                    {move || format!("{}/{} images · PNG, JPG up to 5MB", images.with(|s| s.len()), MAX_IMAGES)}
                </span>
            </div>

            {move || images.with(|s| s.error().map(str::to_string)).map(|e| view! {
                <div class="upload-error">{e}</div>
            })}

            <div class="image-previews">
                {move || images.with(|s| {
                    s.images()
                        .iter()
                        .enumerate()
                        .map(|(index, img)| {
                            let primary = img.is_primary;
                            let preview = img.preview.clone();
                            let name = img.meta.name.clone();
                            view! {
                                <div class=if primary { "image-preview primary" } else { "image-preview" }>
                                    {match preview {
                                        Some(src) => view! { <img src=src alt=name /> }.into_any(),
                                        None => view! { <div class="preview-loading">"…"</div> }.into_any(),
                                    }}
                                    {primary.then(|| view! { <span class="primary-badge">"★ Primary"</span> })}
                                    <div class="preview-actions">
                                        <button
                                            type="button"
                                            class="set-primary-btn"
                                            title="Set as primary"
                                            disabled=primary
                                            on:click=move |_| images.update(|s| s.set_primary(index))
                                        >
                                            "★"
                                        </button>
                                        <button
                                            type="button"
                                            class="remove-btn"
                                            title="Remove"
                                            on:click=move |_| images.update(|s| { s.remove(index); })
                                        >
                                            "✕"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                })}
            </div>

            <Show when=move || images.with(|s| s.is_analyzing())>
                <div class="ai-analyzing">"🤖 Analyzing image..."</div>
            </Show>

            {move || images.with(|s| s.suggestion().cloned()).map(|result| {
                let category = result.suggested_category().map(str::to_string);
                view! {
                    <div class="ai-suggestions">
                        <h4>"🤖 AI Suggestions"</h4>
                        {category.map(|c| view! {
                            <p>
                                "Category: " <strong>{c}</strong>
                                {format!(" ({:.0}% confidence)", result.confidence_score * 100.0)}
                            </p>
                        })}
                        {(!result.detected_colors.is_empty()).then(|| view! {
                            <p>"Colors: " {result.detected_colors.join(", ")}</p>
                        })}
                        {(!result.detected_brands.is_empty()).then(|| view! {
                            <p>"Brands: " {result.detected_brands.join(", ")}</p>
                        })}
                    </div>
                }
            })}
        </div>
    }
}
