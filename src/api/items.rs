//! Item Endpoints
//!
//! Frontend bindings for `/api/items`.

use gloo_net::http::Request;

use super::{authorized, expect_ok, new_form_data, read_json};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{AnalysisResult, Item};
use crate::report::ValidatedReport;

pub async fn list_items(cfg: &AppConfig) -> Result<Vec<Item>, ApiError> {
    let resp = Request::get(&cfg.api_url("/api/items")).send().await?;
    read_json(resp).await
}

pub async fn get_item(cfg: &AppConfig, id: u64) -> Result<Item, ApiError> {
    let resp = Request::get(&cfg.api_url(&format!("/api/items/{}", id)))
        .send()
        .await?;
    read_json(resp).await
}

/// Items reported by the signed-in user
pub async fn list_my_items(cfg: &AppConfig) -> Result<Vec<Item>, ApiError> {
    let resp = authorized(Request::get(&cfg.api_url("/api/items/my")))
        .send()
        .await?;
    read_json(resp).await
}

pub async fn delete_item(cfg: &AppConfig, id: u64) -> Result<(), ApiError> {
    let resp = authorized(Request::delete(&cfg.api_url(&format!("/api/items/{}", id))))
        .send()
        .await?;
    expect_ok(resp).await
}

/// Submit a report as one multipart request; images go out in order, primary first
pub async fn create_item(
    cfg: &AppConfig,
    report: &ValidatedReport,
    images: &[&web_sys::File],
) -> Result<Item, ApiError> {
    let form = new_form_data()?;
    for (name, value) in report.multipart_fields() {
        form.append_with_str(name, &value)?;
    }
    for file in images {
        form.append_with_blob_and_filename("images", *file, &file.name())?;
    }
    log::info!("[API] POST /api/items ({} images)", images.len());
    let resp = authorized(Request::post(&cfg.api_url("/api/items")))
        .body(form)?
        .send()
        .await?;
    read_json(resp).await
}

/// Ask the backend to classify an image (category, colors, brands)
pub async fn analyze_image(cfg: &AppConfig, image: &web_sys::File) -> Result<AnalysisResult, ApiError> {
    let form = new_form_data()?;
    form.append_with_blob_and_filename("image", image, &image.name())?;
    let resp = authorized(Request::post(&cfg.api_url("/api/items/analyze-image")))
        .body(form)?
        .send()
        .await?;
    read_json(resp).await
}
