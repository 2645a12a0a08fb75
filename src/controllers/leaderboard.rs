// src/controllers/leaderboard.rs

use crate::{
    api::ApiClient,
    error::AppError,
    models::{attempt::LeaderboardEntry, quiz::QuizDetail, user::UserSummary},
    services::quiz,
    utils::time::format_minutes_seconds,
};

pub const LEADERBOARD_LIMIT: u32 = 50;
pub const EMPTY_MESSAGE: &str = "No attempts yet. Be the first to take this quiz!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreTier::High
        } else if percentage >= 60.0 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// 1-based position in the list.
    pub rank: usize,
    pub user: UserSummary,
    /// `score/question_count`.
    pub score: String,
    /// Whole percent.
    pub percentage: String,
    pub tier: ScoreTier,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardView {
    NotFound,
    Ready {
        title: String,
        /// Second, first, third; only with three or more entries.
        podium: Option<[LeaderboardRow; 3]>,
        rows: Vec<LeaderboardRow>,
        empty_message: Option<&'static str>,
    },
}

pub struct LeaderboardPage {
    quiz: QuizDetail,
    entries: Vec<LeaderboardEntry>,
}

impl LeaderboardPage {
    /// Fetches the quiz and its leaderboard together; both must succeed.
    pub async fn load(api: &ApiClient, quiz_id: &str) -> Result<Self, AppError> {
        let (quiz, entries) = tokio::try_join!(
            quiz::get_quiz(api, quiz_id),
            quiz::get_quiz_leaderboard(api, quiz_id, Some(LEADERBOARD_LIMIT)),
        )?;
        Ok(Self { quiz, entries })
    }

    /// Page view; any fetch failure renders as "not found".
    pub async fn open(api: &ApiClient, quiz_id: &str) -> LeaderboardView {
        match Self::load(api, quiz_id).await {
            Ok(page) => page.view(),
            Err(e) => {
                tracing::error!(quiz_id, "Failed to fetch leaderboard: {}", e);
                LeaderboardView::NotFound
            }
        }
    }

    pub fn from_parts(quiz: QuizDetail, entries: Vec<LeaderboardEntry>) -> Self {
        Self { quiz, entries }
    }

    pub fn view(&self) -> LeaderboardView {
        let question_count = self.quiz.number_of_questions;
        let rows: Vec<LeaderboardRow> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| LeaderboardRow {
                rank: i + 1,
                user: entry.user.clone(),
                score: format!("{}/{}", entry.score, question_count),
                percentage: format!("{:.0}%", entry.percentage),
                tier: ScoreTier::from_percentage(entry.percentage),
                time: format_minutes_seconds(entry.time_taken_seconds),
            })
            .collect();

        let podium = match rows.as_slice() {
            [first, second, third, ..] => Some([second.clone(), first.clone(), third.clone()]),
            _ => None,
        };

        LeaderboardView::Ready {
            title: self.quiz.title.clone(),
            podium,
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
        }
    }
}
