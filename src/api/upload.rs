// src/api/upload.rs

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::AppError;

/// Largest image the upload forms accept.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// One file sent as a single-field multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Form field name: `avatar`, `banner`, ...
    pub field: &'static str,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(field: &'static str, file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field,
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Reads `path` and guesses the content type from its extension.
    pub async fn from_path(field: &'static str, path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.to_string());
        let mime = mime_from_extension(path).unwrap_or("application/octet-stream");
        Ok(Self::new(field, file_name, mime, bytes))
    }

    /// Image uploads must be JPEG, PNG, GIF or WebP and at most 5 MB.
    pub fn ensure_image(&self) -> Result<(), AppError> {
        if !IMAGE_TYPES.contains(&self.mime.as_str()) {
            return Err(AppError::Validation(
                "Please upload an image in JPEG, PNG, GIF, or WebP format".to_string(),
            ));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation(
                "Image size must not exceed 5MB".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_form(self) -> Result<Form, AppError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(Form::new().part(self.field, part))
    }
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
