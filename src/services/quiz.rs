// src/services/quiz.rs

use serde::Serialize;

use crate::{
    api::ApiClient,
    error::AppError,
    models::{
        Envelope, SearchParams,
        attempt::{LeaderboardEntry, QuizAttempt, QuizResult, SubmitQuizRequest, SubmitQuizResponse},
        quiz::{
            CreateQuizRequest, CreateQuizResponse, LikeCheck, LikeResponse, LikesCount, PublishRequest,
            QuizCard, QuizDetail, QuizDetailResponse, QuizListResponse, TakeQuiz, TakeQuizResponse,
        },
    },
};

/// Lists quizzes, optionally filtered.
pub async fn list_quizzes(api: &ApiClient, params: &SearchParams) -> Result<Vec<QuizCard>, AppError> {
    let res: QuizListResponse = api.get_with_query("quizzes", params).await?;
    Ok(res.quizzes.unwrap_or_default())
}

pub async fn get_quiz(api: &ApiClient, id: &str) -> Result<QuizDetail, AppError> {
    let res: QuizDetailResponse = api.get(&format!("quizzes/{id}")).await?;
    Ok(res.quiz)
}

/// Quiz with its questions and options, for an attempt.
pub async fn get_quiz_for_taking(api: &ApiClient, id: &str) -> Result<TakeQuiz, AppError> {
    let res: TakeQuizResponse = api.get(&format!("quizzes/{id}/take")).await?;
    Ok(res.quiz)
}

/// Returns the id of the new quiz.
pub async fn create_quiz(api: &ApiClient, req: &CreateQuizRequest) -> Result<String, AppError> {
    let res: CreateQuizResponse = api.post("quizzes", req).await?;
    Ok(res.quiz_id)
}

pub async fn update_quiz(api: &ApiClient, id: &str, req: &CreateQuizRequest) -> Result<(), AppError> {
    let _: serde_json::Value = api.put(&format!("quizzes/{id}"), req).await?;
    Ok(())
}

pub async fn delete_quiz(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let _: serde_json::Value = api.delete(&format!("quizzes/{id}")).await?;
    Ok(())
}

pub async fn set_published(api: &ApiClient, id: &str, publish: bool) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .patch(
            &format!("quizzes/{id}/publish"),
            &PublishRequest {
                is_published: publish,
            },
        )
        .await?;
    Ok(())
}

/// Toggles the like; the status is `"liked"` or `"unliked"`.
pub async fn like_quiz(api: &ApiClient, id: &str) -> Result<LikeResponse, AppError> {
    api.post_empty(&format!("quizzes/{id}/like")).await
}

/// Removes the like and returns the new count.
pub async fn unlike_quiz(api: &ApiClient, id: &str) -> Result<i64, AppError> {
    let res: Envelope<LikesCount> = api.delete(&format!("quizzes/{id}/like")).await?;
    Ok(res.into_data()?.likes_count)
}

pub async fn check_quiz_like(api: &ApiClient, id: &str) -> Result<bool, AppError> {
    let res: Envelope<LikeCheck> = api.get(&format!("quizzes/{id}/like")).await?;
    Ok(res.into_data()?.liked)
}

/// Returns the id of the stored attempt.
pub async fn submit_quiz_attempt(
    api: &ApiClient,
    quiz_id: &str,
    req: &SubmitQuizRequest,
) -> Result<String, AppError> {
    let res: SubmitQuizResponse = api.post(&format!("quizzes/{quiz_id}/submit"), req).await?;
    Ok(res.result)
}

/// Detailed breakdown of one attempt.
pub async fn get_quiz_result(api: &ApiClient, attempt_id: &str) -> Result<QuizResult, AppError> {
    api.get(&format!("quizzes/attempts/{attempt_id}/results")).await
}

/// Attempts of the signed-in user on one quiz.
pub async fn get_user_quiz_attempts(api: &ApiClient, quiz_id: &str) -> Result<Vec<QuizAttempt>, AppError> {
    let res: Envelope<Vec<QuizAttempt>> = api.get(&format!("quizzes/{quiz_id}/attempts")).await?;
    res.into_data()
}

#[derive(Serialize)]
struct LimitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

pub async fn get_quiz_leaderboard(
    api: &ApiClient,
    quiz_id: &str,
    limit: Option<u32>,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let res: Envelope<Vec<LeaderboardEntry>> = api
        .get_with_query(&format!("quizzes/{quiz_id}/leaderboard"), &LimitQuery { limit })
        .await?;
    res.into_data()
}

pub async fn get_recommended_quizzes(api: &ApiClient) -> Result<Vec<QuizCard>, AppError> {
    let res: Envelope<Vec<QuizCard>> = api.get("quizzes/recommended").await?;
    res.into_data()
}

pub async fn get_trending_quizzes(api: &ApiClient) -> Result<Vec<QuizCard>, AppError> {
    let res: Envelope<Vec<QuizCard>> = api.get("quizzes/trending").await?;
    res.into_data()
}

pub async fn get_user_created_quizzes(api: &ApiClient, user_id: &str) -> Result<Vec<QuizCard>, AppError> {
    let res: Envelope<Vec<QuizCard>> = api.get(&format!("users/{user_id}/quizzes")).await?;
    res.into_data()
}

pub async fn get_community_quizzes(api: &ApiClient, community_id: &str) -> Result<Vec<QuizCard>, AppError> {
    let res: Envelope<Vec<QuizCard>> = api
        .get(&format!("communities/{community_id}/quizzes"))
        .await?;
    res.into_data()
}
