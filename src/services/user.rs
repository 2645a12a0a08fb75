// src/services/user.rs

use reqwest::Method;

use crate::{
    api::{ApiClient, Upload},
    error::AppError,
    models::{
        Envelope,
        attempt::QuizAttempt,
        user::{AvatarResponse, BannerResponse, Profile, ProfileResponse, UpdateProfileRequest, UserStats},
    },
};

/// Profile of the signed-in user.
pub async fn get_user_profile(api: &ApiClient) -> Result<Profile, AppError> {
    let res: ProfileResponse = api.get("users/me").await?;
    Ok(res.res)
}

pub async fn get_user_by_id(api: &ApiClient, id: &str) -> Result<Profile, AppError> {
    let res: ProfileResponse = api.get(&format!("users/{id}")).await?;
    Ok(res.res)
}

pub async fn update_profile(api: &ApiClient, req: &UpdateProfileRequest) -> Result<(), AppError> {
    let _: serde_json::Value = api.put("users/me", req).await?;
    Ok(())
}

/// Returns the server path of the stored avatar.
pub async fn upload_avatar(api: &ApiClient, upload: Upload) -> Result<String, AppError> {
    upload.ensure_image()?;
    let res: AvatarResponse = api.upload(Method::PUT, "users/me/avatar", upload).await?;
    Ok(res.avatar)
}

/// Returns the server path of the stored banner.
pub async fn upload_banner(api: &ApiClient, upload: Upload) -> Result<String, AppError> {
    upload.ensure_image()?;
    let res: BannerResponse = api.upload(Method::PUT, "users/me/banner", upload).await?;
    Ok(res.banner)
}

pub async fn get_user_stats(api: &ApiClient, user_id: &str) -> Result<UserStats, AppError> {
    let res: Envelope<UserStats> = api.get(&format!("users/{user_id}/stats")).await?;
    res.into_data()
}

pub async fn get_user_attempts(api: &ApiClient, user_id: &str) -> Result<Vec<QuizAttempt>, AppError> {
    let res: Envelope<Vec<QuizAttempt>> = api.get(&format!("users/{user_id}/attempts")).await?;
    res.into_data()
}
