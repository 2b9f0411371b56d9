//! Profile Endpoints
//!
//! Frontend bindings for `/api/auth/profile`.

use gloo_net::http::Request;
use serde::Serialize;

use super::{authorized, expect_ok, new_form_data, read_json};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{Profile, ProfileUpdate};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordArgs<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

pub async fn get_profile(cfg: &AppConfig) -> Result<Profile, ApiError> {
    let resp = authorized(Request::get(&cfg.api_url("/api/auth/profile")))
        .send()
        .await?;
    read_json(resp).await
}

pub async fn update_profile(cfg: &AppConfig, update: &ProfileUpdate) -> Result<Profile, ApiError> {
    let resp = authorized(Request::put(&cfg.api_url("/api/auth/profile")))
        .json(update)?
        .send()
        .await?;
    read_json(resp).await
}

pub async fn change_password(cfg: &AppConfig, old_password: &str, new_password: &str) -> Result<(), ApiError> {
    let resp = authorized(Request::post(&cfg.api_url("/api/auth/profile/change-password")))
        .json(&ChangePasswordArgs { old_password, new_password })?
        .send()
        .await?;
    expect_ok(resp).await
}

pub async fn upload_picture(cfg: &AppConfig, file: &web_sys::File) -> Result<Profile, ApiError> {
    let form = new_form_data()?;
    form.append_with_blob_and_filename("file", file, &file.name())?;
    let resp = authorized(Request::post(&cfg.api_url("/api/auth/profile/upload-picture")))
        .body(form)?
        .send()
        .await?;
    read_json(resp).await
}

pub async fn delete_picture(cfg: &AppConfig) -> Result<Profile, ApiError> {
    let resp = authorized(Request::delete(&cfg.api_url("/api/auth/profile/delete-picture")))
        .send()
        .await?;
    read_json(resp).await
}

