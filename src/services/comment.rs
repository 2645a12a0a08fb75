// src/services/comment.rs

use validator::Validate;

use crate::{
    api::ApiClient,
    error::AppError,
    models::{
        Envelope,
        comment::{Comment, CreateCommentRequest, CreateCommentResponse},
    },
};

pub async fn get_question_comments(api: &ApiClient, question_id: &str) -> Result<Vec<Comment>, AppError> {
    let res: Envelope<Vec<Comment>> = api
        .get(&format!("questions/{question_id}/comments"))
        .await?;
    res.into_data()
}

/// Posts a comment on a question and returns its id.
pub async fn add_comment(api: &ApiClient, question_id: &str, text: &str) -> Result<String, AppError> {
    let req = CreateCommentRequest {
        comment_text: text.trim().to_string(),
    };
    req.validate()?;
    let res: CreateCommentResponse = api
        .post(&format!("questions/{question_id}/comments"), &req)
        .await?;
    Ok(res.id)
}

pub async fn update_comment(api: &ApiClient, comment_id: &str, text: &str) -> Result<(), AppError> {
    let req = CreateCommentRequest {
        comment_text: text.trim().to_string(),
    };
    req.validate()?;
    let _: serde_json::Value = api.put(&format!("comments/{comment_id}"), &req).await?;
    Ok(())
}

pub async fn delete_comment(api: &ApiClient, comment_id: &str) -> Result<(), AppError> {
    let _: serde_json::Value = api.delete(&format!("comments/{comment_id}")).await?;
    Ok(())
}
