use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

fn filled() -> ReportForm {
    ReportForm {
        status: ItemStatus::Found,
        title: "Silver Keys".into(),
        description: "Three keys on a red lanyard".into(),
        category: String::new(),
        location: "Library".into(),
        date: "2024-03-01T14:30".into(),
        contact_info: "finder@campus.edu".into(),
    }
}

#[derive(Default)]
struct RecordingTransport {
    calls: RefCell<Vec<(ValidatedReport, Vec<String>)>>,
    fail_with: Option<ApiError>,
}

impl ReportTransport for RecordingTransport {
    type File = String;

    async fn create_item(&self, report: &ValidatedReport, images: &[&String]) -> Result<Item, ApiError> {
        self.calls
            .borrow_mut()
            .push((report.clone(), images.iter().map(|s| s.to_string()).collect()));
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(Item {
            id: 7,
            title: report.title.clone(),
            description: report.description.clone(),
            category: report.category.clone(),
            location: report.location.clone(),
            date: report.date.clone(),
            status: report.status,
            image_url: None,
            images: Vec::new(),
            contact_info: Some(report.contact_info.clone()),
            user: None,
            ai_labels: Vec::new(),
        })
    }
}

// =============================================================
// Steps & field validation
// =============================================================

#[test]
fn test_wizard_steps_are_linear() {
    assert_eq!(WizardStep::default(), WizardStep::Details);
    assert_eq!(WizardStep::Details.next(), Some(WizardStep::Review));
    assert_eq!(WizardStep::Review.next(), None);
    assert_eq!(WizardStep::Review.prev(), Some(WizardStep::Details));
    assert_eq!(WizardStep::Review.number(), 2);
}

#[test]
fn test_details_step_requires_text_fields() {
    let mut form = filled();
    form.location = "  ".into();
    assert_eq!(form.validate_details(), Err(ReportError::MissingField("location")));
    assert_eq!(
        form.validate_details().unwrap_err().to_string(),
        "Please fill in the location."
    );

    form.location = "Main Canteen".into();
    form.contact_info.clear();
    assert_eq!(form.validate_details(), Err(ReportError::MissingField("contact information")));
}

#[test]
fn test_normalize_date_adds_seconds() {
    assert_eq!(normalize_date("2024-03-01T14:30").unwrap(), "2024-03-01T14:30:00");
    assert_eq!(normalize_date("2024-03-01T14:30:15").unwrap(), "2024-03-01T14:30:15");
    assert_eq!(normalize_date("2024-03-01").unwrap(), "2024-03-01T00:00:00");
    assert_eq!(normalize_date(""), Err(ReportError::MissingDate));
    assert_eq!(normalize_date("yesterday"), Err(ReportError::InvalidDate));
    assert_eq!(normalize_date("2024-03-01T2pm"), Err(ReportError::InvalidDate));
}

#[test]
fn test_blank_category_falls_back_to_suggestion() {
    let form = filled();
    let report = form.validate(Some("Keys")).unwrap();
    assert_eq!(report.category, "Keys");

    let mut chosen = filled();
    chosen.category = "Other".into();
    assert_eq!(chosen.validate(Some("Keys")).unwrap().category, "Other");
}

#[test]
fn test_multipart_fields_use_backend_names() {
    let report = filled().validate(None).unwrap();
    let fields = report.multipart_fields();
    let names: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        vec!["title", "category", "status", "location", "date", "description", "contactInfo"]
    );
    assert!(fields.contains(&("status", "FOUND".to_string())));
    assert!(fields.contains(&("date", "2024-03-01T14:30:00".to_string())));
}

// =============================================================
// Voice extraction & templates
// =============================================================

#[test]
fn test_extracted_fields_fill_form() {
    let mut form = ReportForm::default();
    form.apply_extracted(&ExtractedFields {
        item_type: Some("FOUND".into()),
        title: Some(" Blue Umbrella ".into()),
        category: Some("bags & accessories".into()),
        description: None,
        location: Some("".into()),
        date: Some("2024-02-10".into()),
    });
    assert_eq!(form.status, ItemStatus::Found);
    assert_eq!(form.title, "Blue Umbrella");
    assert_eq!(form.category, "Bags & Accessories");
    assert_eq!(form.location, "");
    assert_eq!(form.date, "2024-02-10T00:00");
}

#[test]
fn test_unknown_extracted_category_is_ignored() {
    let mut form = filled();
    form.category = "Keys".into();
    form.apply_extracted(&ExtractedFields { category: Some("Pets".into()), ..Default::default() });
    assert_eq!(form.category, "Keys");
}

// =============================================================
// Submit flow
// =============================================================

#[test]
fn test_missing_date_never_calls_transport() {
    let transport = RecordingTransport::default();
    let mut form = filled();
    form.date.clear();

    let err = block_on(submit_report(&transport, &form, None, &[])).unwrap_err();
    assert_eq!(err, SubmitError::Invalid(ReportError::MissingDate));
    assert_eq!(err.to_string(), "Please select a date and time.");
    assert!(transport.calls.borrow().is_empty());
}

#[test]
fn test_submit_sends_one_request_with_images_in_order() {
    let transport = RecordingTransport::default();
    let primary = "primary.jpg".to_string();
    let other = "other.jpg".to_string();

    let item = block_on(submit_report(&transport, &filled(), Some("Keys"), &[&primary, &other])).unwrap();
    assert_eq!(item.id, 7);

    let calls = transport.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.category, "Keys");
    assert_eq!(calls[0].1, vec!["primary.jpg", "other.jpg"]);
}

#[test]
fn test_submit_failure_prefers_server_message() {
    let transport = RecordingTransport {
        fail_with: Some(ApiError::Status {
            status: 400,
            code: None,
            message: Some("Title too long".into()),
        }),
        ..Default::default()
    };
    let err = block_on(submit_report(&transport, &filled(), None, &[])).unwrap_err();
    assert_eq!(err, SubmitError::Failed("Title too long".into()));
}

#[test]
fn test_failure_message_fallbacks() {
    let bare = ApiError::Status { status: 500, code: None, message: None };
    assert_eq!(failure_message(&bare), "Failed to submit report. Please try again.");
    assert_eq!(
        failure_message(&ApiError::Network("TypeError".into())),
        "Network error. Please try again."
    );
}
