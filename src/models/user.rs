// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::community::MemberRole;

/// Minimal user card embedded in quizzes, comments and leaderboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub avatar: Option<String>,
}

/// User as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}

/// Profile of the signed-in user (`GET /users/me`, wrapped in `{"res": ..}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    #[serde(default)]
    pub communities: Vec<ProfileCommunity>,
    #[serde(default)]
    pub attempts: Vec<ProfileAttempt>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&Profile> for User {
    fn from(profile: &Profile) -> Self {
        User {
            id: profile.id.clone(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            avatar: profile.avatar.clone(),
            banner: profile.banner.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCommunity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number_of_quizzes: u32,
    #[serde(default)]
    pub member_count: u32,
    pub role: MemberRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAttempt {
    pub quiz: ProfileQuiz,
    pub score: u32,
    pub time_taken_minutes: u32,
    pub attempt_number: u32,
    pub percentage: f64,
    pub completed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuiz {
    pub id: String,
    pub title: String,
    pub questions_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub res: Profile,
}

/// Aggregated quiz statistics for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    pub total_quizzes_taken: u32,
    pub average_score: f64,
    pub best_score: f64,
}

/// DTO for user login.
#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Please enter your password"))]
    pub password: String,
}

/// DTO for creating a new account.
#[derive(Debug, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,
}

/// Partial profile update; absent fields are left untouched by the server.
#[derive(Debug, Default, Serialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub struct BannerResponse {
    pub banner: String,
}
