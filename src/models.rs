//! Frontend Models
//!
//! Data structures matching backend JSON (camelCase).

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

/// Fixed category list shared by the wizard, gallery and extraction prompt
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Bags & Accessories",
    "Books & Stationery",
    "Sports Equipment",
    "Personal Items",
    "Documents",
    "Keys",
    "Other",
];

/// Backend sends explicit `null` for unset columns; treat it like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lost or found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    #[default]
    Lost,
    Found,
}

impl ItemStatus {
    /// Wire value for multipart submission
    pub fn as_wire(self) -> &'static str {
        match self {
            ItemStatus::Lost => "LOST",
            ItemStatus::Found => "FOUND",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
        }
    }

    /// Accepts `lost`/`found` in any case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Some(ItemStatus::Lost),
            "found" => Some(ItemStatus::Found),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl UserSummary {
    /// Uppercase first letter of the name, `U` when empty
    pub fn initials(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImage {
    pub id: u64,
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upload_order: i32,
}

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// ISO local date-time, e.g. `2024-03-01T14:30:00`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ItemImage>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_labels: Vec<String>,
}

impl Item {
    /// Image references, primary first then by upload order.
    /// Falls back to the single `imageUrl` for items created before multi-image support.
    pub fn image_refs(&self) -> Vec<String> {
        if self.images.is_empty() {
            return self.image_url.iter().cloned().collect();
        }
        let mut images: Vec<&ItemImage> = self.images.iter().collect();
        images.sort_by_key(|img| (!img.is_primary, img.upload_order));
        images.into_iter().map(|img| img.image_url.clone()).collect()
    }

    pub fn primary_image(&self) -> Option<String> {
        self.image_refs().into_iter().next()
    }

    pub fn reporter_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Contact address: explicit contact info, else the reporter's email
    pub fn contact_address(&self) -> Option<String> {
        self.contact_info
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| self.user.as_ref().map(|u| u.email.clone()).filter(|e| !e.is_empty()))
    }

    /// Date part of the ISO timestamp (`YYYY-MM-DD`)
    pub fn display_date(&self) -> String {
        self.date.split('T').next().unwrap_or_default().to_string()
    }
}

/// Profile as returned by `/api/auth/profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<String>,
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

/// Editable profile fields (PUT body)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub year_of_study: String,
    pub university_id: String,
    pub department: String,
}

impl From<&Profile> for ProfileUpdate {
    fn from(p: &Profile) -> Self {
        Self {
            name: p.name.clone(),
            email: p.email.clone(),
            phone_number: p.phone_number.clone().unwrap_or_default(),
            year_of_study: p.year_of_study.clone().unwrap_or_default(),
            university_id: p.university_id.clone().unwrap_or_default(),
            department: p.department.clone().unwrap_or_default(),
        }
    }
}

/// Image analysis result from `/api/items/analyze-image`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detected_colors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detected_brands: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
}

impl AnalysisResult {
    /// Category usable as a form suggestion (`Unknown` means no match)
    pub fn suggested_category(&self) -> Option<&str> {
        let c = self.category.trim();
        (!c.is_empty() && !c.eq_ignore_ascii_case("unknown")).then_some(c)
    }
}

/// Fields extracted from a spoken description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Token response shared by legacy login, registration and identity exchange
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}
