// src/models/attempt.rs

use serde::{Deserialize, Serialize};

use crate::models::{comment::Comment, user::UserSummary};

/// One answered question inside a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswer {
    pub question_id: String,
    pub option_id: String,
    /// Display text of the chosen option.
    pub answer_text: String,
}

/// DTO for submitting a quiz attempt (`POST /quizzes/:id/submit`).
/// Built once when the attempt is submitted and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitQuizRequest {
    /// Whole minutes consumed, partial minutes rounded up.
    pub duration_minutes: u32,
    pub answers: Vec<SubmitAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizResponse {
    /// Identifier of the stored attempt; keys the results page.
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionWithStats {
    pub option_id: String,
    pub text: String,
    pub is_correct: bool,
    pub selection_count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub question_text: String,
    #[serde(default)]
    pub explanation: String,
    pub correct_answer: String,
    /// Option id the user picked, if any.
    pub user_answer: Option<String>,
    pub is_correct: bool,
    #[serde(default)]
    pub options: Vec<OptionWithStats>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl QuestionResult {
    pub fn was_answered(&self) -> bool {
        self.user_answer.is_some()
    }
}

/// Full breakdown of one attempt (`GET /quizzes/attempts/:id/results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub attempt_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_taken_minutes: u32,
    pub completed_at: String,
    #[serde(default)]
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub rank: u32,
    pub user: UserSummary,
    pub score: u32,
    pub percentage: f64,
    pub time_taken_seconds: u32,
    pub completed_at: String,
}

/// One past attempt of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_taken_seconds: u32,
    pub completed_at: String,
}
