//! Item Report Model
//!
//! Wizard form state, validation, and the submit flow behind a transport trait.

use thiserror::Error;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{ExtractedFields, Item, ItemStatus, CATEGORIES};

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

/// Delay before redirecting after a successful submit
pub const REDIRECT_DELAY_MS: u32 = 2000;

const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit report. Please try again.";

/// Wizard steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Details,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 2] = [WizardStep::Details, WizardStep::Review];

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Item Details",
            WizardStep::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::Details => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            WizardStep::Details => None,
            WizardStep::Review => Some(WizardStep::Details),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Please fill in the {0}.")]
    MissingField(&'static str),
    #[error("Please select a date and time.")]
    MissingDate,
    #[error("Please enter a valid date and time.")]
    InvalidDate,
}

/// Raw wizard input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    pub status: ItemStatus,
    pub title: String,
    pub description: String,
    /// Empty means "use the AI suggestion"
    pub category: String,
    pub location: String,
    /// `datetime-local` value, `YYYY-MM-DDTHH:MM`
    pub date: String,
    pub contact_info: String,
}

/// Checked report ready for submission
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReport {
    pub status: ItemStatus,
    pub title: String,
    pub category: String,
    pub location: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub date: String,
    pub description: String,
    pub contact_info: String,
}

impl ValidatedReport {
    /// Multipart text fields, in backend parameter names
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("category", self.category.clone()),
            ("status", self.status.as_wire().to_string()),
            ("location", self.location.clone()),
            ("date", self.date.clone()),
            ("description", self.description.clone()),
            ("contactInfo", self.contact_info.clone()),
        ]
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Shape check for `YYYY-MM-DD`
fn is_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    matches!(parts.as_slice(), [y, m, d] if y.len() == 4 && m.len() == 2 && d.len() == 2 && is_digits(y) && is_digits(m) && is_digits(d))
}

/// Normalize a date-time input to `YYYY-MM-DDTHH:MM:SS`.
/// `HH:MM` gains `:00`; a bare date becomes midnight.
pub fn normalize_date(input: &str) -> Result<String, ReportError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ReportError::MissingDate);
    }
    let (date, time) = input.split_once('T').unwrap_or((input, "00:00"));
    if !is_date(date) {
        return Err(ReportError::InvalidDate);
    }
    let pieces: Vec<&str> = time.split(':').collect();
    let ok = (pieces.len() == 2 || pieces.len() == 3) && pieces.iter().all(|p| p.len() == 2 && is_digits(p));
    if !ok {
        return Err(ReportError::InvalidDate);
    }
    let time = if pieces.len() == 2 { format!("{}:00", time) } else { time.to_string() };
    Ok(format!("{}T{}", date, time))
}

/// Canonical category name for free text, case-insensitive
pub fn canonical_category(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    CATEGORIES.iter().copied().find(|c| c.eq_ignore_ascii_case(raw))
}

impl ReportForm {
    /// Required text fields for leaving the details step
    pub fn validate_details(&self) -> Result<(), ReportError> {
        let required = [
            (&self.title, "item title"),
            (&self.description, "description"),
            (&self.location, "location"),
            (&self.contact_info, "contact information"),
        ];
        for (value, name) in required {
            if value.trim().is_empty() {
                return Err(ReportError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Full check before submit; date first since it is the blocking alert
    pub fn validate(&self, suggested_category: Option<&str>) -> Result<ValidatedReport, ReportError> {
        if self.date.trim().is_empty() {
            return Err(ReportError::MissingDate);
        }
        self.validate_details()?;
        let date = normalize_date(&self.date)?;
        Ok(ValidatedReport {
            status: self.status,
            title: self.title.trim().to_string(),
            category: self.effective_category(suggested_category),
            location: self.location.trim().to_string(),
            date,
            description: self.description.trim().to_string(),
            contact_info: self.contact_info.trim().to_string(),
        })
    }

    /// User choice, else AI suggestion, else empty (backend infers or uses `Other`)
    pub fn effective_category(&self, suggested_category: Option<&str>) -> String {
        if !self.category.trim().is_empty() {
            return self.category.trim().to_string();
        }
        suggested_category.unwrap_or_default().to_string()
    }

    /// Copy extracted voice fields in; empty values are ignored
    pub fn apply_extracted(&mut self, fields: &ExtractedFields) {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        if let Some(status) = fields.item_type.as_deref().and_then(ItemStatus::parse) {
            self.status = status;
        }
        if let Some(title) = present(&fields.title) {
            self.title = title;
        }
        if let Some(category) = fields.category.as_deref().and_then(canonical_category) {
            self.category = category.to_string();
        }
        if let Some(description) = present(&fields.description) {
            self.description = description;
        }
        if let Some(location) = present(&fields.location) {
            self.location = location;
        }
        if let Some(date) = present(&fields.date) {
            // datetime-local needs a time part
            if is_date(&date) {
                self.date = format!("{}T00:00", date);
            } else if normalize_date(&date).is_ok() {
                self.date = date;
            }
        }
    }
}

/// Submit failure shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(ReportError),
    #[error("{0}")]
    Failed(String),
}

/// Server message, else transport error text, else the generic message
pub fn failure_message(err: &ApiError) -> String {
    if let Some(msg) = err.server_message() {
        return msg.to_string();
    }
    match err {
        ApiError::Status { .. } => SUBMIT_FALLBACK_MESSAGE.to_string(),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                SUBMIT_FALLBACK_MESSAGE.to_string()
            } else {
                text
            }
        }
    }
}

/// Where submitted reports go
#[allow(async_fn_in_trait)]
pub trait ReportTransport {
    type File;

    async fn create_item(&self, report: &ValidatedReport, images: &[&Self::File]) -> Result<Item, ApiError>;
}

/// Validate then send once; nothing is sent when validation fails
pub async fn submit_report<T: ReportTransport>(
    transport: &T,
    form: &ReportForm,
    suggested_category: Option<&str>,
    images: &[&T::File],
) -> Result<Item, SubmitError> {
    let report = form.validate(suggested_category).map_err(SubmitError::Invalid)?;
    log::info!("[REPORT] submitting {} report \"{}\"", report.status.as_str(), report.title);
    transport
        .create_item(&report, images)
        .await
        .map_err(|e| SubmitError::Failed(failure_message(&e)))
}

/// Backend transport
pub struct HttpReportTransport {
    pub config: AppConfig,
}

impl ReportTransport for HttpReportTransport {
    type File = web_sys::File;

    async fn create_item(&self, report: &ValidatedReport, images: &[&web_sys::File]) -> Result<Item, ApiError> {
        crate::api::create_item(&self.config, report, images).await
    }
}
