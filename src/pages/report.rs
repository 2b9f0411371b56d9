//! Report Item Page
//!
//! Two-step wizard: details (with voice, templates and photos), then review and submit.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::{ImageSignal, MultiImageUpload, QuickTemplates, VoiceInput};
use crate::context::use_config;
use crate::images::ImageSet;
use crate::models::{ExtractedFields, ItemStatus, CATEGORIES};
use crate::report::{self, HttpReportTransport, ReportForm, SubmitError, WizardStep, REDIRECT_DELAY_MS};
use crate::store::{store_add_item, use_app_store};
use crate::templates::{DetailChoice, Template};

/// Free-text inputs of the details step
#[derive(Debug, Clone, Copy)]
enum TextField {
    Title,
    Category,
    Description,
    Location,
    Date,
    Contact,
}

impl TextField {
    fn slot(self, form: &mut ReportForm) -> &mut String {
        match self {
            TextField::Title => &mut form.title,
            TextField::Category => &mut form.category,
            TextField::Description => &mut form.description,
            TextField::Location => &mut form.location,
            TextField::Date => &mut form.date,
            TextField::Contact => &mut form.contact_info,
        }
    }

    fn get(self, form: &ReportForm) -> &str {
        match self {
            TextField::Title => &form.title,
            TextField::Category => &form.category,
            TextField::Description => &form.description,
            TextField::Location => &form.location,
            TextField::Date => &form.date,
            TextField::Contact => &form.contact_info,
        }
    }
}

fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::warn!("[REPORT] alert failed: {:?}", e);
    }
}

#[component]
pub fn ReportPage() -> impl IntoView {
    let config = use_config();
    let store = use_app_store();
    let navigate = use_navigate();

    let form = RwSignal::new(ReportForm::default());
    let images: ImageSignal = RwSignal::new_local(ImageSet::new());
    let step = RwSignal::new(WizardStep::Details);
    let step_error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    let suggested_category = move || {
        images.with(|s| s.suggestion().and_then(|r| r.suggested_category()).map(str::to_string))
    };

    let bind = move |field: TextField| {
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            form.update(|f| *field.slot(f) = value);
        }
    };
    let value_of = move |field: TextField| move || form.with(|f| field.get(f).to_string());

    let next = move |_| {
        match form.with(|f| f.validate_details()) {
            Ok(()) => {
                step_error.set(None);
                if let Some(s) = step.get_untracked().next() {
                    step.set(s);
                }
            }
            Err(e) => step_error.set(Some(e.to_string())),
        }
    };

    let back = move |_| {
        step_error.set(None);
        if let Some(s) = step.get_untracked().prev() {
            step.set(s);
        }
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let snapshot = form.get_untracked();
        let suggestion = suggested_category();
        let files: Vec<web_sys::File> =
            images.with_untracked(|s| s.submit_order().into_iter().cloned().collect());
        let transport = HttpReportTransport { config: config.clone() };
        let navigate = navigate.clone();
        submitting.set(true);
        spawn_local(async move {
            let refs: Vec<&web_sys::File> = files.iter().collect();
            let outcome = report::submit_report(&transport, &snapshot, suggestion.as_deref(), &refs).await;
            submitting.set(false);
            match outcome {
                Ok(item) => {
                    log::info!("[REPORT] created item {}", item.id);
                    store_add_item(&store, item);
                    submitted.set(true);
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    navigate("/dashboard", NavigateOptions::default());
                }
                Err(SubmitError::Invalid(e)) => alert(&e.to_string()),
                Err(SubmitError::Failed(message)) => {
                    log::error!("[REPORT] submit failed: {}", message);
                    alert(&message);
                }
            }
        });
    };

    let status_button = move |status: ItemStatus, label: &'static str| {
        view! {
            <button
                type="button"
                class=move || if form.with(|f| f.status == status) { "type-btn active" } else { "type-btn" }
                on:click=move |_| form.update(|f| f.status = status)
            >
                {label}
            </button>
        }
    };

    let details_step = move || {
        view! {
            <div class="wizard-step details-step">
                <div class="form-group">
                    <label>"Type"</label>
                    <div class="type-toggle">
                        {status_button(ItemStatus::Lost, "😟 I Lost Something")}
                        {status_button(ItemStatus::Found, "😊 I Found Something")}
                    </div>
                </div>

                <VoiceInput
                    existing_text=form.with_untracked(|f| f.description.clone())
                    on_transcript=move |text: String| form.update(|f| f.description = text)
                    on_fields=move |fields: ExtractedFields| form.update(|f| f.apply_extracted(&fields))
                />

                <QuickTemplates
                    on_select_template=move |t: &'static Template| form.update(|f| f.apply_template(t))
                    on_select_detail=move |choice: DetailChoice| form.update(|f| f.apply_detail(choice))
                />

                <div class="form-group">
                    <label>"Item Title *"</label>
                    <input
                        type="text"
                        placeholder="e.g. Black iPhone 13"
                        prop:value=value_of(TextField::Title)
                        on:input=bind(TextField::Title)
                    />
                </div>

                <div class="form-group">
                    <label>"Category"</label>
                    <select
                        prop:value=value_of(TextField::Category)
                        on:change=bind(TextField::Category)
                    >
                        <option value="">
                            {move || match suggested_category() {
                                Some(c) => format!("Use AI suggestion ({})", c),
                                None => "Select a category".to_string(),
                            }}
                        </option>
                        {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label>"Description *"</label>
                    <textarea
                        rows="4"
                        placeholder="Color, brand, distinguishing marks..."
                        prop:value=value_of(TextField::Description)
                        on:input=bind(TextField::Description)
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label>"Location *"</label>
                        <input
                            type="text"
                            placeholder="Where was it lost or found?"
                            prop:value=value_of(TextField::Location)
                            on:input=bind(TextField::Location)
                        />
                    </div>
                    <div class="form-group">
                        <label>"Date & Time *"</label>
                        <input
                            type="datetime-local"
                            prop:value=value_of(TextField::Date)
                            on:input=bind(TextField::Date)
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label>"Contact Information *"</label>
                    <input
                        type="text"
                        placeholder="Email or phone number"
                        prop:value=value_of(TextField::Contact)
                        on:input=bind(TextField::Contact)
                    />
                </div>

                <div class="form-group">
                    <label>"Photos"</label>
                    <MultiImageUpload images=images />
                </div>
            </div>
        }
    };

    let review_step = move || {
        let f = form.get();
        let category = f.effective_category(suggested_category().as_deref());
        let image_count = images.with(|s| s.len());
        let rows: Vec<(&'static str, String)> = vec![
            ("Type", f.status.as_str().to_string()),
            ("Title", f.title),
            ("Category", if category.is_empty() { "Other".to_string() } else { category }),
            ("Description", f.description),
            ("Location", f.location),
            ("Date", if f.date.is_empty() { "Not set".to_string() } else { f.date.replace('T', " ") }),
            ("Contact", f.contact_info),
            ("Photos", format!("{} selected", image_count)),
        ];
        view! {
            <div class="wizard-step review-step">
                <dl class="review-list">
                    {rows.into_iter().map(|(label, value)| view! {
                        <div class="review-row">
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        </div>
                    }).collect_view()}
                </dl>
            </div>
        }
    };

    view! {
        <div class="report-page">
            <h1>"Report an Item"</h1>

            <div class="wizard-progress">
                {WizardStep::ALL.into_iter().map(|s| view! {
                    <div class=move || if step.get() == s { "progress-step active" } else { "progress-step" }>
                        <span class="step-number">{s.number()}</span>
                        <span class="step-title">{s.title()}</span>
                    </div>
                }).collect_view()}
            </div>

            <Show when=move || submitted.get()>
                <div class="success-banner">"✅ Report submitted! Redirecting to your dashboard..."</div>
            </Show>

            {move || match step.get() {
                WizardStep::Details => details_step().into_any(),
                WizardStep::Review => review_step().into_any(),
            }}

            {move || step_error.get().map(|e| view! { <div class="error-text step-error">{e}</div> })}

            <div class="wizard-nav">
                <Show when=move || step.get().prev().is_some()>
                    <button type="button" class="btn btn-secondary" on:click=back>"← Back"</button>
                </Show>
                <Show
                    when=move || step.get().next().is_some()
                    fallback={
                        let on_submit = on_submit.clone();
                        move || view! {
                            <button
                                type="button"
                                class="btn btn-primary"
                                disabled=move || submitting.get() || submitted.get()
                                on:click=on_submit.clone()
                            >
                                {move || if submitting.get() { "Submitting..." } else { "Submit Report" }}
                            </button>
                        }
                    }
                >
                    <button type="button" class="btn btn-primary" on:click=next>"Next →"</button>
                </Show>
            </div>
        </div>
    }
}
