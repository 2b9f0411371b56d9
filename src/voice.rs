//! Voice Input Model
//!
//! Transcript accumulation, helper state machine and language-model prompt/response handling.
//! Browser bindings live in `speech`.

use crate::models::{ExtractedFields, CATEGORIES};

#[cfg(test)]
#[path = "voice_test.rs"]
mod voice_test;

/// Helper lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoicePhase {
    #[default]
    Idle,
    Listening,
    Stopped,
    Processing,
    Preview,
}

/// Extractable form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceField {
    Type,
    Title,
    Category,
    Description,
    Location,
    Date,
}

impl VoiceField {
    pub const ALL: [VoiceField; 6] = [
        VoiceField::Type,
        VoiceField::Title,
        VoiceField::Category,
        VoiceField::Description,
        VoiceField::Location,
        VoiceField::Date,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VoiceField::Type => "Type (Lost/Found)",
            VoiceField::Title => "Item Title",
            VoiceField::Category => "Category",
            VoiceField::Description => "Description",
            VoiceField::Location => "Location",
            VoiceField::Date => "Date",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            VoiceField::Type => "🔖",
            VoiceField::Title => "📌",
            VoiceField::Category => "🗂️",
            VoiceField::Description => "📝",
            VoiceField::Location => "📍",
            VoiceField::Date => "📅",
        }
    }

    /// Non-empty extracted value for this field
    pub fn value(self, fields: &ExtractedFields) -> Option<&str> {
        let v = match self {
            VoiceField::Type => fields.item_type.as_deref(),
            VoiceField::Title => fields.title.as_deref(),
            VoiceField::Category => fields.category.as_deref(),
            VoiceField::Description => fields.description.as_deref(),
            VoiceField::Location => fields.location.as_deref(),
            VoiceField::Date => fields.date.as_deref(),
        };
        v.map(str::trim).filter(|s| !s.is_empty())
    }

    /// Copy only this field into an otherwise empty set
    pub fn isolate(self, fields: &ExtractedFields) -> ExtractedFields {
        let value = self.value(fields).map(str::to_string);
        let mut out = ExtractedFields::default();
        match self {
            VoiceField::Type => out.item_type = value,
            VoiceField::Title => out.title = value,
            VoiceField::Category => out.category = value,
            VoiceField::Description => out.description = value,
            VoiceField::Location => out.location = value,
            VoiceField::Date => out.date = value,
        }
        out
    }
}

/// One recognition result as delivered by the browser
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionSegment {
    pub text: String,
    pub is_final: bool,
}

/// Final transcript plus the current interim tail
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub final_text: String,
    pub interim: String,
}

impl Transcript {
    pub fn new(existing: &str) -> Self {
        Self {
            final_text: existing.to_string(),
            interim: String::new(),
        }
    }

    /// Apply results from `resultIndex` onward: finals are appended space-separated,
    /// interims replace the interim tail.
    pub fn apply(&mut self, segments: &[RecognitionSegment]) {
        let mut interim = String::new();
        for seg in segments {
            if seg.is_final {
                if !self.final_text.is_empty() {
                    self.final_text.push(' ');
                }
                self.final_text.push_str(seg.text.trim());
            } else {
                interim.push_str(&seg.text);
            }
        }
        self.interim = interim;
    }

    /// Recognition ended: interim text is dropped
    pub fn end(&mut self) {
        self.interim.clear();
    }

    pub fn clear(&mut self) {
        self.final_text.clear();
        self.interim.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.final_text.trim().is_empty() && self.interim.trim().is_empty()
    }

    pub fn trimmed(&self) -> &str {
        self.final_text.trim()
    }
}

/// User-facing message for a recognition error code
pub fn recognition_error_message(code: &str) -> &'static str {
    match code {
        "no-speech" => "No speech detected. Please try again.",
        "not-allowed" => "Microphone access denied. Please allow microphone access.",
        _ => "Speech recognition error. Please retry.",
    }
}

/// Microphone level in `[0, 1]` from analyser byte frequencies
pub fn volume_level(frequencies: &[u8]) -> f64 {
    if frequencies.is_empty() {
        return 0.0;
    }
    let sum: u32 = frequencies.iter().map(|&b| u32::from(b)).sum();
    let avg = f64::from(sum) / frequencies.len() as f64;
    (avg / 100.0).min(1.0)
}

/// Prompt sent to the language model
pub fn build_prompt(transcript: &str) -> String {
    let categories = CATEGORIES
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"You are a smart assistant for a campus lost-and-found app.
A user described an item they lost or found using voice. Extract structured information from the transcript below and return ONLY a valid JSON object with these exact keys:
{{
  "type": "lost" or "found" (detect from context, default to "lost"),
  "title": "short item name e.g. Black iPhone 15 Pro",
  "category": one of [{categories}],
  "description": "a clean 1-2 sentence description using details mentioned",
  "location": "location mentioned, or empty string",
  "date": "date mentioned in YYYY-MM-DD format, or empty string"
}}

Rules:
- Return ONLY the JSON object, no markdown, no code fences, no explanation.
- If a field cannot be determined, use an empty string.
- Infer category intelligently (e.g. phone/earbuds → Electronics, wallet → Personal Items, ID card → Documents).
- Title should be concise, 3–6 words max.

Transcript: "{transcript}"
"#,
        categories = categories,
        transcript = transcript.replace('"', "'"),
    )
}

/// Remove ```json / ``` markers and surrounding whitespace
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model output into fields
pub fn parse_extraction(raw: &str) -> Result<ExtractedFields, String> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err("empty response".to_string());
    }
    serde_json::from_str::<ExtractedFields>(&cleaned).map_err(|e| e.to_string())
}

/// Fields with a usable value
pub fn present_fields(fields: &ExtractedFields) -> Vec<VoiceField> {
    VoiceField::ALL
        .iter()
        .copied()
        .filter(|f| f.value(fields).is_some())
        .collect()
}

/// Voice helper state: phase, transcript, extraction result and applied fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceSession {
    pub phase: VoicePhase,
    pub transcript: Transcript,
    pub error: Option<String>,
    pub result: Option<ExtractedFields>,
    pub applied: Vec<VoiceField>,
    /// Bumped on every start and stop; a level meter opened for an older value is stale
    pub listen_id: u32,
}

impl VoiceSession {
    pub fn new(existing: &str) -> Self {
        Self {
            transcript: Transcript::new(existing),
            ..Default::default()
        }
    }

    /// Returns the id the level meter must still match once the microphone opens
    pub fn start_listening(&mut self) -> u32 {
        self.error = None;
        self.result = None;
        self.applied.clear();
        self.phase = VoicePhase::Listening;
        self.listen_id = self.listen_id.wrapping_add(1);
        self.listen_id
    }

    /// Invalidate any level meter still being opened
    pub fn release_meter(&mut self) {
        self.listen_id = self.listen_id.wrapping_add(1);
    }

    /// A meter opened for `id` may be kept only while that same listen is live
    pub fn wants_meter(&self, id: u32) -> bool {
        self.phase == VoicePhase::Listening && self.listen_id == id
    }

    /// Recognition stopped (user or browser)
    pub fn on_end(&mut self) {
        self.transcript.end();
        if self.phase == VoicePhase::Listening {
            self.phase = VoicePhase::Stopped;
        }
    }

    pub fn on_error(&mut self, code: &str) {
        self.error = Some(recognition_error_message(code).to_string());
        self.transcript.end();
        self.phase = VoicePhase::Stopped;
    }

    /// Enter `Processing`; returns the transcript to send, or `None` when empty
    pub fn begin_processing(&mut self) -> Option<String> {
        let text = self.transcript.trimmed().to_string();
        if text.is_empty() || self.phase == VoicePhase::Processing {
            return None;
        }
        self.error = None;
        self.result = None;
        self.phase = VoicePhase::Processing;
        Some(text)
    }

    pub fn finish_processing(&mut self, outcome: Result<ExtractedFields, String>) {
        match outcome {
            Ok(fields) => {
                self.result = Some(fields);
                self.phase = VoicePhase::Preview;
            }
            Err(reason) => {
                self.error = Some(reason);
                self.phase = VoicePhase::Stopped;
            }
        }
    }

    /// Everything present in the result; hides the preview
    pub fn apply_all(&mut self) -> Option<ExtractedFields> {
        let fields = self.result.clone()?;
        self.applied = present_fields(&fields);
        self.phase = VoicePhase::Stopped;
        Some(fields)
    }

    /// A single field, at most once
    pub fn apply_field(&mut self, field: VoiceField) -> Option<ExtractedFields> {
        if self.applied.contains(&field) {
            return None;
        }
        let fields = self.result.as_ref()?;
        field.value(fields)?;
        let single = field.isolate(fields);
        self.applied.push(field);
        Some(single)
    }

    pub fn is_applied(&self, field: VoiceField) -> bool {
        self.applied.contains(&field)
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.result = None;
        self.applied.clear();
        self.error = None;
        if self.phase != VoicePhase::Listening {
            self.phase = VoicePhase::Idle;
        }
    }
}
