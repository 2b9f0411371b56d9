//! Generative Language Client
//!
//! Sends a voice transcript to `generateContent` and parses the reply into form fields.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::ExtractedFields;
use crate::voice;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateArgs<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize, Default)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// First candidate's first text part, empty if absent
    pub(crate) fn first_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or("")
    }
}

/// Extract structured fields from a transcript
pub async fn extract_fields(cfg: &AppConfig, transcript: &str) -> Result<ExtractedFields, ApiError> {
    if cfg.gemini_api_key.is_empty() {
        return Err(ApiError::Extraction(
            "no API key configured (set LOSTFOUND_GEMINI_API_KEY)".into(),
        ));
    }
    let prompt = voice::build_prompt(transcript);
    let url = format!(
        "{}/{}:generateContent?key={}",
        GEMINI_BASE, cfg.gemini_model, cfg.gemini_api_key
    );
    let args = GenerateArgs {
        contents: [Content { parts: [Part { text: &prompt }] }],
        generation_config: GenerationConfig { temperature: 0.1, max_output_tokens: 512 },
    };

    let resp = Request::post(&url).json(&args)?.send().await?;
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        let reason = nested_error_message(&body).unwrap_or_else(|| "Gemini API error".to_string());
        return Err(ApiError::Extraction(reason));
    }
    let generated: GenerateResponse = resp.json().await?;
    voice::parse_extraction(generated.first_text()).map_err(ApiError::Extraction)
}

/// `{"error":{"message": ...}}`
fn nested_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\":\"Wallet\"}"}]}}]}"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_text(), r#"{"title":"Wallet"}"#);
        assert_eq!(GenerateResponse::default().first_text(), "");
    }

    #[test]
    fn test_nested_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        assert_eq!(nested_error_message(body).as_deref(), Some("API key not valid."));
        assert_eq!(nested_error_message("{}"), None);
    }
}
