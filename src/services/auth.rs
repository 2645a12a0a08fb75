// src/services/auth.rs

use validator::Validate;

use crate::{
    api::ApiClient,
    error::AppError,
    models::{
        Envelope,
        user::{LoginRequest, RegisterRequest, User},
    },
};

/// Opens a session; the server answers with a cookie and, usually, the user.
pub async fn login(api: &ApiClient, req: &LoginRequest) -> Result<Option<User>, AppError> {
    req.validate()?;
    let res: Envelope<User> = api.post("auth/login", req).await?;
    Ok(res.data)
}

pub async fn register(api: &ApiClient, req: &RegisterRequest) -> Result<Option<User>, AppError> {
    req.validate()?;
    let res: Envelope<User> = api.post("auth/register", req).await?;
    Ok(res.data)
}

pub async fn logout(api: &ApiClient) -> Result<(), AppError> {
    let _: serde_json::Value = api.post_empty("auth/logout").await?;
    Ok(())
}
