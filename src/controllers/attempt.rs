// src/controllers/attempt.rs

use std::collections::HashMap;

use crate::{
    error::AppError,
    models::{
        attempt::{SubmitAnswer, SubmitQuizRequest},
        quiz::{TakeQuestion, TakeQuiz},
    },
    utils::time::{self, TimerTier},
};

/// Where an open attempt stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// A submission request is in flight.
    Submitting,
    /// Stored by the server under this attempt id.
    Done(String),
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Seconds left after this tick.
    Running(u32),
    /// This tick consumed the last second; submit now.
    Expired,
    /// A submission is in flight; the clock waits for it.
    Held,
    /// Nothing more to count.
    Stopped,
}

/// One timed run through a loaded quiz.
///
/// Pure state: no I/O, no clock. The driver feeds it ticks and user input
/// and performs the submission request itself.
#[derive(Debug, Clone)]
pub struct Attempt {
    quiz: TakeQuiz,
    answers: HashMap<String, String>,
    cursor: usize,
    remaining: u32,
    phase: Phase,
    last_error: Option<AppError>,
}

impl Attempt {
    pub fn new(quiz: TakeQuiz) -> Self {
        let remaining = quiz.duration.saturating_mul(60);
        Self {
            quiz,
            answers: HashMap::new(),
            cursor: 0,
            remaining,
            phase: Phase::Active,
            last_error: None,
        }
    }

    pub fn quiz(&self) -> &TakeQuiz {
        &self.quiz
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn total_seconds(&self) -> u32 {
        self.quiz.duration.saturating_mul(60)
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    /// Whether the quiz runs against a clock at all.
    pub fn is_timed(&self) -> bool {
        self.total_seconds() > 0
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> Option<&TakeQuestion> {
        self.quiz.questions.get(self.cursor)
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Records `option_id` as the answer to `question_id`, replacing any
    /// earlier choice. Both must belong to the loaded quiz.
    pub fn select_answer(&mut self, question_id: &str, option_id: &str) -> Result<(), AppError> {
        if !self.is_active() {
            return Err(AppError::Validation(
                "The quiz is no longer accepting answers".to_string(),
            ));
        }
        let question = self
            .quiz
            .question(question_id)
            .ok_or_else(|| AppError::Validation(format!("Unknown question {question_id}")))?;
        if question.option(option_id).is_none() {
            return Err(AppError::Validation(format!(
                "Option {option_id} does not belong to question {question_id}"
            )));
        }

        self.answers
            .insert(question_id.to_string(), option_id.to_string());
        Ok(())
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

    /// Ignored when `index` is out of range.
    pub fn go_to_question(&mut self, index: usize) -> bool {
        if index < self.question_count() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Only an active attempt with time left counts down. Once the clock is
    /// at zero, later ticks stop the ticker rather than expiring again, so a
    /// failed automatic submission is not retried every second.
    pub fn tick(&mut self) -> Tick {
        match self.phase {
            Phase::Submitting => Tick::Held,
            Phase::Done(_) => Tick::Stopped,
            Phase::Active if self.remaining == 0 => Tick::Stopped,
            Phase::Active => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    Tick::Expired
                } else {
                    Tick::Running(self.remaining)
                }
            }
        }
    }

    /// Whole minutes used so far, partial minutes rounded up.
    pub fn elapsed_minutes(&self) -> u32 {
        (self.total_seconds() - self.remaining).div_ceil(60)
    }

    /// Moves to `Submitting` and builds the payload, or returns `None` if a
    /// submission is already in flight or finished.
    ///
    /// Unanswered questions are left out of the payload.
    pub fn begin_submit(&mut self) -> Option<SubmitQuizRequest> {
        if !self.is_active() {
            return None;
        }
        self.phase = Phase::Submitting;
        self.last_error = None;

        let answers = self
            .quiz
            .questions
            .iter()
            .filter_map(|question| {
                let option_id = self.answers.get(&question.question_id)?;
                let answer_text = question
                    .option(option_id)
                    .map(|o| o.text.clone())
                    .unwrap_or_default();
                Some(SubmitAnswer {
                    question_id: question.question_id.clone(),
                    option_id: option_id.clone(),
                    answer_text,
                })
            })
            .collect();

        Some(SubmitQuizRequest {
            duration_minutes: self.elapsed_minutes(),
            answers,
        })
    }

    pub fn complete(&mut self, attempt_id: String) {
        self.phase = Phase::Done(attempt_id);
    }

    /// Returns to `Active` so the user can try again.
    pub fn fail(&mut self, error: AppError) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Active;
        }
        self.last_error = Some(error);
    }

    pub fn confirm_prompt(&self) -> String {
        let answered = self.answered_count();
        let total = self.question_count();
        let mut prompt = format!("You have answered {answered} of {total} questions.");
        if answered < total {
            prompt.push_str(" Are you sure you want to submit?");
        }
        prompt
    }

    pub fn view(&self) -> AttemptView {
        let total = self.question_count();
        let answered = self.answered_count();
        let current = self.current_question().map(|question| CurrentQuestion {
            index: self.cursor,
            question: question.clone(),
            selected: self.answer(&question.question_id).map(str::to_string),
        });

        AttemptView {
            quiz_id: self.quiz.quiz_id.clone(),
            title: self.quiz.title.clone(),
            current,
            answered: self
                .quiz
                .questions
                .iter()
                .map(|q| self.answers.contains_key(&q.question_id))
                .collect(),
            answered_count: answered,
            question_count: total,
            progress: if total == 0 {
                0.0
            } else {
                answered as f64 / total as f64
            },
            is_first: self.cursor == 0,
            is_last: self.cursor + 1 >= total,
            remaining_seconds: self.remaining,
            clock: time::format_clock(self.remaining),
            urgent: self.is_timed() && time::is_urgent(self.remaining),
            timer_tier: time::timer_tier(self.remaining, self.total_seconds()),
            phase: self.phase.clone(),
            error: self
                .last_error
                .as_ref()
                .map(|e| e.user_message("Failed to submit quiz")),
        }
    }
}

/// The question under the cursor, with the option picked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentQuestion {
    pub index: usize,
    pub question: TakeQuestion,
    pub selected: Option<String>,
}

/// Snapshot of an attempt for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptView {
    pub quiz_id: String,
    pub title: String,
    pub current: Option<CurrentQuestion>,
    /// One flag per question, in quiz order.
    pub answered: Vec<bool>,
    pub answered_count: usize,
    pub question_count: usize,
    /// Answered share, `0.0..=1.0`.
    pub progress: f64,
    pub is_first: bool,
    pub is_last: bool,
    pub remaining_seconds: u32,
    pub clock: String,
    pub urgent: bool,
    pub timer_tier: TimerTier,
    pub phase: Phase,
    pub error: Option<String>,
}
