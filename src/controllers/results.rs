// src/controllers/results.rs

use crate::{
    api::ApiClient,
    error::AppError,
    models::attempt::{QuestionResult, QuizResult},
    services::{comment, quiz},
};

/// Letter grade of a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Grade::APlus,
            p if p >= 80.0 => Grade::A,
            p if p >= 70.0 => Grade::B,
            p if p >= 60.0 => Grade::C,
            p if p >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    /// Rounded.
    pub percentage: u32,
    pub grade: Grade,
    pub time_taken_minutes: u32,
    pub completed_at: String,
    /// "Question 2 of 5".
    pub progress_label: String,
    /// Share of questions reviewed so far, rounded percent.
    pub progress_percent: u32,
    pub index: usize,
    pub question: Option<QuestionResult>,
    pub is_first: bool,
    pub is_last: bool,
    /// Shown on the last question.
    pub completion_message: Option<String>,
}

/// Review of one stored attempt, question by question.
pub struct ResultsPage {
    api: ApiClient,
    attempt_id: String,
    result: Option<QuizResult>,
    cursor: usize,
    loading: bool,
}

impl ResultsPage {
    pub fn new(api: ApiClient, attempt_id: impl Into<String>) -> Self {
        Self {
            api,
            attempt_id: attempt_id.into(),
            result: None,
            cursor: 0,
            loading: true,
        }
    }

    /// Creates the page and fetches the result; a failed fetch leaves it empty.
    pub async fn open(api: ApiClient, attempt_id: impl Into<String>) -> Self {
        let mut page = Self::new(api, attempt_id);
        if let Err(e) = page.load().await {
            tracing::error!("Failed to fetch results: {}", e);
        }
        page
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        let res = quiz::get_quiz_result(&self.api, &self.attempt_id).await;
        self.loading = false;
        let result = res?;
        self.cursor = self.cursor.min(result.questions.len().saturating_sub(1));
        self.result = Some(result);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    fn question_count(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.questions.len())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn go_to_next(&mut self) -> bool {
        if self.cursor + 1 < self.question_count() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn go_to_previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to_question(&mut self, index: usize) -> bool {
        if index < self.question_count() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Posts a comment on a question, then reloads the result so the new
    /// comment shows up with the server's data.
    pub async fn add_comment(&mut self, question_id: &str, text: &str) -> Result<(), AppError> {
        let known = self
            .result
            .as_ref()
            .is_some_and(|r| r.questions.iter().any(|q| q.question_id == question_id));
        if !known {
            return Err(AppError::Validation(format!("Unknown question {question_id}")));
        }

        let comment_id = comment::add_comment(&self.api, question_id, text)
            .await
            .inspect_err(|e| tracing::error!("Failed to add comment: {}", e))?;
        tracing::info!(%comment_id, question_id, "Comment added");

        self.load().await
    }

    pub fn view(&self) -> Option<ResultsView> {
        let result = self.result.as_ref()?;
        let total = result.questions.len();
        let is_last = self.cursor + 1 >= total;
        let percentage = result.percentage.round().max(0.0) as u32;
        let progress_percent = if total == 0 {
            0
        } else {
            (((self.cursor + 1) as f64 / total as f64) * 100.0).round() as u32
        };

        Some(ResultsView {
            quiz_id: result.quiz_id.clone(),
            quiz_title: result.quiz_title.clone(),
            score: result.score,
            total_questions: result.total_questions,
            percentage,
            grade: Grade::from_percentage(result.percentage),
            time_taken_minutes: result.time_taken_minutes,
            completed_at: result.completed_at.clone(),
            progress_label: format!("Question {} of {}", self.cursor + 1, total),
            progress_percent,
            index: self.cursor,
            question: result.questions.get(self.cursor).cloned(),
            is_first: self.cursor == 0,
            is_last,
            completion_message: is_last.then(|| {
                format!("You've reviewed all questions. Your final score is {percentage}%.")
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_follow_the_percentage() {
        assert_eq!(Grade::from_percentage(95.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(80.0), Grade::A);
        assert_eq!(Grade::from_percentage(79.9), Grade::B);
        assert_eq!(Grade::from_percentage(60.0), Grade::C);
        assert_eq!(Grade::from_percentage(50.0), Grade::D);
        assert_eq!(Grade::from_percentage(12.0).as_str(), "F");
    }
}
