//! Voice Input Component
//!
//! Dictate a description, then let the language model split it into form fields.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::gemini;
use crate::context::use_config;
use crate::error::ApiError;
use crate::models::ExtractedFields;
use crate::speech::{Recognizer, VolumeMeter};
use crate::voice::{present_fields, VoiceField, VoicePhase, VoiceSession};

fn extraction_error(e: ApiError) -> String {
    match e {
        ApiError::Extraction(_) => e.to_string(),
        other => format!("AI parsing failed: {}", other),
    }
}

#[component]
pub fn VoiceInput(
    /// Raw transcript, for "use as description only"
    #[prop(into)]
    on_transcript: Callback<String>,
    /// Structured fields, all at once or one at a time
    #[prop(into)]
    on_fields: Callback<ExtractedFields>,
    #[prop(into, default = String::new())] existing_text: String,
) -> impl IntoView {
    let config = use_config();
    let session = RwSignal::new(VoiceSession::new(&existing_text));
    let volume = RwSignal::new(0.0_f64);
    let meter = StoredValue::new_local(None::<VolumeMeter>);

    let stop_meter = move || {
        session.update(|s| s.release_meter());
        meter.update_value(|m| *m = None);
        volume.set(0.0);
    };

    let recognizer = StoredValue::new_local(Recognizer::new(
        move |segments| session.update(|s| s.transcript.apply(&segments)),
        move || {
            session.update(|s| s.on_end());
            stop_meter();
        },
        move |code| {
            session.update(|s| s.on_error(&code));
            stop_meter();
        },
    ));
    let supported = recognizer.with_value(|r| r.is_some());
    on_cleanup(move || {
        recognizer.dispose();
        meter.dispose();
    });

    let start_listening = move |_| {
        let Some(listen_id) = session.try_update(|s| s.start_listening()) else {
            return;
        };
        spawn_local(async move {
            // Visualization is optional
            match VolumeMeter::start(move |v| volume.set(v)).await {
                Ok(m) => {
                    let live = session.try_with_untracked(|s| s.wants_meter(listen_id)).unwrap_or(false);
                    if live {
                        meter.try_update_value(|slot| *slot = Some(m));
                    } else {
                        // Stopped while the microphone was opening; dropping releases it
                        log::debug!("[VOICE] discarding stale level meter");
                        drop(m);
                    }
                }
                Err(e) => log::debug!("[VOICE] no level meter: {:?}", e),
            }
        });
        let started = recognizer.with_value(|r| r.as_ref().map(|r| r.start()));
        if let Some(Err(e)) = started {
            log::warn!("[VOICE] start failed: {:?}", e);
            session.update(|s| s.on_error("start-failed"));
            stop_meter();
        }
    };

    let stop_listening = move |_| {
        recognizer.with_value(|r| {
            if let Some(r) = r {
                r.stop();
            }
        });
        stop_meter();
    };

    let analyse = move |_| {
        let Some(text) = session.try_update(|s| s.begin_processing()).flatten() else {
            return;
        };
        let config = config.clone();
        spawn_local(async move {
            let outcome = gemini::extract_fields(&config, &text).await.map_err(extraction_error);
            if let Err(reason) = &outcome {
                log::warn!("[VOICE] extraction failed: {}", reason);
            }
            session.update(|s| s.finish_processing(outcome));
        });
    };

    let apply_all = move |_| {
        if let Some(fields) = session.try_update(|s| s.apply_all()).flatten() {
            on_fields.run(fields);
        }
    };

    let apply_field = move |field: VoiceField| {
        if let Some(single) = session.try_update(|s| s.apply_field(field)).flatten() {
            on_fields.run(single);
        }
    };

    let use_as_description = move |_| {
        let text = session.with_untracked(|s| s.transcript.trimmed().to_string());
        if !text.is_empty() {
            on_transcript.run(text);
        }
    };

    let phase = move || session.with(|s| s.phase);
    let listening = move || phase() == VoicePhase::Listening;
    let has_text = move || session.with(|s| !s.transcript.is_empty());

    if !supported {
        return view! {
            <div class="voice-input unsupported">
                <p>"ℹ Voice input is not supported in this browser. Try Chrome or Edge."</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="voice-input">
            <div class="voice-controls">
                <Show
                    when=listening
                    fallback=move || view! {
                        <button type="button" class="voice-btn start" on:click=start_listening>
                            "🎤 Start Speaking"
                        </button>
                    }
                >
                    <button type="button" class="voice-btn stop" on:click=stop_listening>
                        "⏹ Stop"
                    </button>
                    <div class="volume-meter">
                        <div
                            class="volume-bar"
                            style=move || format!("width: {:.0}%", volume.get() * 100.0)
                        />
                    </div>
                </Show>
            </div>

            <div class="transcript-box">
                {move || session.with(|s| {
                    if s.transcript.is_empty() && s.transcript.interim.is_empty() {
                        view! { <p class="transcript-placeholder">"Describe the item: what it is, where and when..."</p> }.into_any()
                    } else {
                        view! {
                            <p class="transcript-text">
                                {s.transcript.final_text.clone()}
                                " "
                                <span class="interim">{s.transcript.interim.clone()}</span>
                            </p>
                        }
                        .into_any()
                    }
                })}
            </div>

            {move || session.with(|s| s.error.clone()).map(|e| view! { <div class="voice-error">"⚠ " {e}</div> })}

            <Show when=move || has_text() && !listening()>
                <div class="voice-actions">
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || phase() == VoicePhase::Processing
                        on:click=analyse.clone()
                    >
                        {move || if phase() == VoicePhase::Processing { "Analysing..." } else { "✨ Fill form with AI" }}
                    </button>
                    <button type="button" class="btn btn-secondary" on:click=use_as_description>
                        "Use as description only"
                    </button>
                    <button type="button" class="btn btn-ghost" on:click=move |_| session.update(|s| s.clear())>
                        "↺ Clear"
                    </button>
                </div>
            </Show>

            <Show when=move || phase() == VoicePhase::Preview>
                <div class="ai-preview">
                    <h4>"AI extracted these details"</h4>
                    {move || {
                        let fields = session.with(|s| s.result.clone()).unwrap_or_default();
                        present_fields(&fields)
                            .into_iter()
                            .map(|field| {
                                let value = field.value(&fields).unwrap_or_default().to_string();
                                view! {
                                    <div class="preview-row">
                                        <span class="preview-label">{field.icon()} " " {field.label()}</span>
                                        <span class="preview-value">{value}</span>
                                        <button
                                            type="button"
                                            class="btn btn-sm"
                                            disabled=move || session.with(|s| s.is_applied(field))
                                            on:click=move |_| apply_field(field)
                                        >
                                            {move || if session.with(|s| s.is_applied(field)) { "✓ Applied" } else { "Apply" }}
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <button type="button" class="btn btn-primary" on:click=apply_all>
                        "Apply All"
                    </button>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
