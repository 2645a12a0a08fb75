// src/models/mod.rs

pub mod attempt;
pub mod comment;
pub mod community;
pub mod quiz;
pub mod user;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Query string of the listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Wrapper used by endpoints that answer `{"success": .., "data": ..}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps `data`; a missing payload is reported with the server's own message.
    pub fn into_data(self) -> Result<T, AppError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(AppError::Decode(
                self.error
                    .or(self.message)
                    .unwrap_or_else(|| "response carried no data".to_string()),
            )),
        }
    }
}
