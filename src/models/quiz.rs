// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::user::UserSummary;

/// Number of options every authored question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Quiz as sent for an attempt (`GET /quizzes/:id/take`).
/// Options carry no correctness information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeQuiz {
    pub quiz_id: String,
    pub title: String,
    /// Minutes.
    pub duration: u32,
    pub questions: Vec<TakeQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeQuestion {
    pub question_id: String,
    pub question_text: String,
    pub options: Vec<TakeOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeOption {
    pub option_id: String,
    pub text: String,
}

impl TakeQuiz {
    pub fn question(&self, question_id: &str) -> Option<&TakeQuestion> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }
}

impl TakeQuestion {
    pub fn option(&self, option_id: &str) -> Option<&TakeOption> {
        self.options.iter().find(|o| o.option_id == option_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct TakeQuizResponse {
    pub quiz: TakeQuiz,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCommunity {
    pub id: String,
    pub name: String,
    pub banner: Option<String>,
    /// `CREATOR`, `JOINED` or `NOT_JOINED`.
    #[serde(default)]
    pub is_joined: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCreator {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: String,
}

/// Quiz as shown in listings and community pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizCard {
    pub id: String,
    #[serde(default)]
    pub community: Option<QuizCommunity>,
    pub creator: Option<QuizCreator>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, alias = "is_like")]
    pub is_liked: bool,
    #[serde(default)]
    pub number_of_questions: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub students_count: u32,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizListResponse {
    #[serde(default)]
    pub quizzes: Option<Vec<QuizCard>>,
}

/// Latest attempts embedded in the quiz detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentAttempt {
    pub attempt_id: String,
    pub time_taken_minutes: u32,
    pub score: f64,
    pub submitted_at: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDetail {
    pub id: String,
    pub community: Option<QuizCommunity>,
    pub creator: Option<QuizCreator>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, alias = "is_liked")]
    pub is_like: bool,
    #[serde(default)]
    pub number_of_questions: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub students_count: u32,
    #[serde(default)]
    pub leaderboard: Vec<RecentAttempt>,
    #[serde(default)]
    pub created_at: String,
    pub current_attempt_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizDetailResponse {
    pub quiz: QuizDetail,
}

/// DTO for one authored option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOption {
    pub text: String,
    pub is_correct: bool,
}

/// DTO for one authored question.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewQuestion {
    #[validate(length(min = 1, max = 1000, message = "is empty"))]
    pub question_text: String,
    pub explanation: String,
    /// Text of the correct option.
    pub correct_answer: String,
    pub order_index: u32,
    #[validate(custom(function = validate_options))]
    pub options: Vec<NewOption>,
}

/// DTO for creating a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "Please select a community"))]
    pub community_id: String,
    #[validate(length(min = 1, max = 200, message = "Please enter a quiz title"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: u32,
    pub is_published: bool,
    #[validate(length(min = 1, message = "Quiz must have at least one question"))]
    pub questions: Vec<NewQuestion>,
}

/// Exactly four options, none blank, exactly one marked correct.
fn validate_options(options: &[NewOption]) -> Result<(), ValidationError> {
    if options.len() != OPTIONS_PER_QUESTION {
        return Err(ValidationError::new("option_count")
            .with_message("must have exactly 4 options".into()));
    }
    if options.iter().any(|o| o.text.trim().is_empty()) {
        return Err(ValidationError::new("empty_option").with_message("has empty options".into()));
    }
    if options.iter().filter(|o| o.is_correct).count() != 1 {
        return Err(ValidationError::new("correct_count")
            .with_message("must have exactly one correct answer".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateQuizResponse {
    pub quiz_id: String,
}

#[derive(Debug, Serialize)]
pub struct PublishRequest {
    pub is_published: bool,
}

/// `POST /quizzes/:id/like` toggles; the status says which way it went.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeCheck {
    pub liked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikesCount {
    pub likes_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> NewOption {
        NewOption {
            text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn options_rules() {
        let good = vec![
            option("a", true),
            option("b", false),
            option("c", false),
            option("d", false),
        ];
        assert!(validate_options(&good).is_ok());

        let err = validate_options(&good[..3]).unwrap_err();
        assert_eq!(err.code, "option_count");

        let mut blank = good.clone();
        blank[2].text = "  ".to_string();
        assert_eq!(validate_options(&blank).unwrap_err().code, "empty_option");

        let mut two_correct = good.clone();
        two_correct[1].is_correct = true;
        assert_eq!(
            validate_options(&two_correct).unwrap_err().code,
            "correct_count"
        );
    }

    #[test]
    fn community_quiz_uses_is_like() {
        let card: QuizCard = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "creator": null,
            "title": "Rust basics",
            "duration_minutes": 10,
            "is_like": true
        }))
        .unwrap();
        assert!(card.is_liked);
        assert!(card.community.is_none());
    }
}
