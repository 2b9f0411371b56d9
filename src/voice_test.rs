use super::*;

fn seg(text: &str, is_final: bool) -> RecognitionSegment {
    RecognitionSegment { text: text.to_string(), is_final }
}

// =============================================================
// Transcript
// =============================================================

#[test]
fn test_finals_are_joined_with_single_spaces() {
    let mut t = Transcript::default();
    t.apply(&[seg("I lost my wallet", true)]);
    t.apply(&[seg(" near the library ", true), seg("yester", false)]);
    assert_eq!(t.final_text, "I lost my wallet near the library");
    assert_eq!(t.interim, "yester");
}

#[test]
fn test_interim_is_replaced_not_accumulated() {
    let mut t = Transcript::new("Black bag");
    t.apply(&[seg("in the", false), seg(" canteen", false)]);
    assert_eq!(t.interim, "in the canteen");
    t.apply(&[seg("in", false)]);
    assert_eq!(t.interim, "in");
    t.end();
    assert_eq!(t.interim, "");
    assert_eq!(t.final_text, "Black bag");
}

#[test]
fn test_volume_is_mean_over_hundred_clamped() {
    assert_eq!(volume_level(&[]), 0.0);
    assert_eq!(volume_level(&[50, 50]), 0.5);
    assert_eq!(volume_level(&[255, 255, 255]), 1.0);
}

#[test]
fn test_recognition_errors_map_to_messages() {
    assert_eq!(recognition_error_message("no-speech"), "No speech detected. Please try again.");
    assert_eq!(
        recognition_error_message("not-allowed"),
        "Microphone access denied. Please allow microphone access."
    );
    assert_eq!(recognition_error_message("network"), "Speech recognition error. Please retry.");
}

// =============================================================
// Extraction parsing
// =============================================================

#[test]
fn test_code_fences_are_stripped() {
    let raw = "```json\n{\"type\":\"found\",\"title\":\"Silver Keys\"}\n```";
    assert_eq!(strip_code_fences(raw), "{\"type\":\"found\",\"title\":\"Silver Keys\"}");
    let fields = parse_extraction(raw).unwrap();
    assert_eq!(fields.item_type.as_deref(), Some("found"));
    assert_eq!(fields.title.as_deref(), Some("Silver Keys"));
}

#[test]
fn test_non_json_reply_is_an_error() {
    assert!(parse_extraction("Sorry, I cannot help with that.").is_err());
    assert_eq!(parse_extraction("```\n```").unwrap_err(), "empty response");
}

#[test]
fn test_prompt_embeds_transcript_and_categories() {
    let prompt = build_prompt("lost my \"blue\" umbrella");
    assert!(prompt.contains("Transcript: \"lost my 'blue' umbrella\""));
    assert!(prompt.contains("\"Bags & Accessories\""));
    assert!(prompt.contains("return ONLY a valid JSON object"));
}

// =============================================================
// VoiceSession
// =============================================================

fn extracted() -> ExtractedFields {
    ExtractedFields {
        item_type: Some("lost".into()),
        title: Some("Black Wallet".into()),
        category: Some("Personal Items".into()),
        description: Some("Leather wallet with student ID.".into()),
        location: Some("".into()),
        date: None,
    }
}

#[test]
fn test_session_walks_listen_process_preview() {
    let mut s = VoiceSession::default();
    s.start_listening();
    assert_eq!(s.phase, VoicePhase::Listening);
    s.transcript.apply(&[seg("lost my black wallet", true)]);
    s.on_end();
    assert_eq!(s.phase, VoicePhase::Stopped);

    assert_eq!(s.begin_processing().as_deref(), Some("lost my black wallet"));
    assert_eq!(s.phase, VoicePhase::Processing);
    assert_eq!(s.begin_processing(), None);

    s.finish_processing(Ok(extracted()));
    assert_eq!(s.phase, VoicePhase::Preview);
}

#[test]
fn test_empty_transcript_is_not_processed() {
    let mut s = VoiceSession::new("   ");
    assert_eq!(s.begin_processing(), None);
    assert_eq!(s.phase, VoicePhase::Idle);
}

#[test]
fn test_failed_extraction_surfaces_inline_error() {
    let mut s = VoiceSession::new("keys");
    s.begin_processing();
    s.finish_processing(Err("AI parsing failed: bad json".into()));
    assert_eq!(s.phase, VoicePhase::Stopped);
    assert_eq!(s.error.as_deref(), Some("AI parsing failed: bad json"));
    assert!(s.result.is_none());
}

#[test]
fn test_apply_all_marks_only_present_fields() {
    let mut s = VoiceSession::new("x");
    s.finish_processing(Ok(extracted()));
    let fields = s.apply_all().unwrap();
    assert_eq!(fields.title.as_deref(), Some("Black Wallet"));
    assert_eq!(
        s.applied,
        vec![VoiceField::Type, VoiceField::Title, VoiceField::Category, VoiceField::Description]
    );
    assert_eq!(s.phase, VoicePhase::Stopped);
}

#[test]
fn test_apply_field_is_isolated_and_once() {
    let mut s = VoiceSession::new("x");
    s.finish_processing(Ok(extracted()));
    let single = s.apply_field(VoiceField::Title).unwrap();
    assert_eq!(single.title.as_deref(), Some("Black Wallet"));
    assert_eq!(single.category, None);
    assert!(s.is_applied(VoiceField::Title));
    assert_eq!(s.apply_field(VoiceField::Title), None);
    // empty location is not applicable
    assert_eq!(s.apply_field(VoiceField::Location), None);
    assert!(!s.is_applied(VoiceField::Location));
}

#[test]
fn test_listening_resets_previous_result() {
    let mut s = VoiceSession::new("x");
    s.finish_processing(Ok(extracted()));
    s.apply_field(VoiceField::Type);
    s.on_error("no-speech");
    s.start_listening();
    assert!(s.result.is_none());
    assert!(s.applied.is_empty());
    assert!(s.error.is_none());
}

#[test]
fn test_clear_resets_everything() {
    let mut s = VoiceSession::new("some words");
    s.finish_processing(Ok(extracted()));
    s.clear();
    assert!(s.transcript.is_empty());
    assert!(s.result.is_none());
    assert_eq!(s.phase, VoicePhase::Idle);
}

#[test]
fn test_meter_opened_after_stop_is_stale() {
    let mut s = VoiceSession::default();
    let id = s.start_listening();
    assert!(s.wants_meter(id));
    // Stop pressed before the microphone resolved
    s.release_meter();
    assert!(!s.wants_meter(id));
}

#[test]
fn test_meter_from_earlier_listen_is_stale() {
    let mut s = VoiceSession::default();
    let first = s.start_listening();
    s.on_end();
    assert!(!s.wants_meter(first));
    let second = s.start_listening();
    assert!(!s.wants_meter(first));
    assert!(s.wants_meter(second));
    s.on_error("network");
    assert!(!s.wants_meter(second));
}
