// src/models/comment.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Comment on a result question, with author info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub comment_text: String,
    pub created_at: String,
}

/// DTO for creating or editing a comment.
#[derive(Debug, Serialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Comment must be between 1 and 1000 characters"
    ))]
    pub comment_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentResponse {
    pub id: String,
}
