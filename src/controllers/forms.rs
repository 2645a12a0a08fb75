// src/controllers/forms.rs

use validator::Validate;

use crate::{
    api::{ApiClient, Upload},
    error::AppError,
    models::{
        community::CreateCommunityRequest,
        quiz::{CreateQuizRequest, NewOption, NewQuestion, OPTIONS_PER_QUESTION},
    },
    routes::{Navigator, Route},
    services::{community, quiz},
};

pub const DEFAULT_DURATION_MINUTES: u32 = 15;

/// One question being authored. The first option starts out correct.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub question_text: String,
    pub explanation: String,
    pub options: Vec<NewOption>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            question_text: String::new(),
            explanation: String::new(),
            options: (0..OPTIONS_PER_QUESTION)
                .map(|i| NewOption {
                    text: String::new(),
                    is_correct: i == 0,
                })
                .collect(),
        }
    }
}

impl QuestionDraft {
    fn correct_answer(&self) -> String {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.text.trim().to_string())
            .unwrap_or_default()
    }

    /// First problem with this question, worded for position `number`.
    fn problem(&self, number: usize) -> Option<String> {
        if self.question_text.trim().is_empty() {
            return Some(format!("Question {number} is empty"));
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Some(format!(
                "Question {number} must have exactly {OPTIONS_PER_QUESTION} options"
            ));
        }
        if self.options.iter().any(|o| o.text.trim().is_empty()) {
            return Some(format!("Question {number} has empty options"));
        }
        if self.options.iter().filter(|o| o.is_correct).count() != 1 {
            return Some(format!("Question {number} must have exactly one correct answer"));
        }
        None
    }
}

/// The create-quiz form.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub community_id: String,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub is_published: bool,
    questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    pub fn new(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
            title: String::new(),
            description: String::new(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            is_published: true,
            questions: vec![QuestionDraft::default()],
        }
    }

    pub fn questions(&self) -> &[QuestionDraft] {
        &self.questions
    }

    pub fn add_question(&mut self) -> usize {
        self.questions.push(QuestionDraft::default());
        self.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) -> Result<(), AppError> {
        if self.questions.len() <= 1 {
            return Err(AppError::Validation(
                "Quiz must have at least one question".to_string(),
            ));
        }
        if index >= self.questions.len() {
            return Err(AppError::Validation(format!("No question at position {}", index + 1)));
        }
        self.questions.remove(index);
        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut QuestionDraft, AppError> {
        self.questions
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("No question at position {}", index + 1)))
    }

    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), AppError> {
        self.question_mut(index)?.question_text = text.into();
        Ok(())
    }

    pub fn set_explanation(&mut self, index: usize, text: impl Into<String>) -> Result<(), AppError> {
        self.question_mut(index)?.explanation = text.into();
        Ok(())
    }

    pub fn set_option_text(
        &mut self,
        question: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<(), AppError> {
        let slot = self
            .question_mut(question)?
            .options
            .get_mut(option)
            .ok_or_else(|| AppError::Validation(format!("No option {}", option + 1)))?;
        slot.text = text.into();
        Ok(())
    }

    /// Marks one option correct and every other option of the question wrong.
    pub fn set_correct_option(&mut self, question: usize, option: usize) -> Result<(), AppError> {
        let draft = self.question_mut(question)?;
        if option >= draft.options.len() {
            return Err(AppError::Validation(format!("No option {}", option + 1)));
        }
        for (i, o) in draft.options.iter_mut().enumerate() {
            o.is_correct = i == option;
        }
        Ok(())
    }

    /// Checks the form in display order and reports the first problem.
    pub fn validate(&self) -> Result<(), AppError> {
        let fail = |msg: &str| Err(AppError::Validation(msg.to_string()));

        if self.community_id.trim().is_empty() {
            return fail("Please select a community");
        }
        if self.title.trim().is_empty() {
            return fail("Please enter a quiz title");
        }
        if self.duration_minutes < 1 {
            return fail("Duration must be at least 1 minute");
        }
        if self.questions.is_empty() {
            return fail("Quiz must have at least one question");
        }
        for (i, question) in self.questions.iter().enumerate() {
            if let Some(problem) = question.problem(i + 1) {
                return Err(AppError::Validation(problem));
            }
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<CreateQuizRequest, AppError> {
        self.validate()?;

        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| NewQuestion {
                question_text: q.question_text.trim().to_string(),
                explanation: q.explanation.trim().to_string(),
                correct_answer: q.correct_answer(),
                order_index: i as u32 + 1,
                options: q
                    .options
                    .iter()
                    .map(|o| NewOption {
                        text: o.text.trim().to_string(),
                        is_correct: o.is_correct,
                    })
                    .collect(),
            })
            .collect();

        let req = CreateQuizRequest {
            community_id: self.community_id.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            duration_minutes: self.duration_minutes,
            is_published: self.is_published,
            questions,
        };
        // Length caps the ordered checks above do not cover.
        req.validate()?;
        Ok(req)
    }

    /// Creates the quiz and opens its community. The error carries the
    /// inline message to show.
    pub async fn submit(&self, api: &ApiClient, navigator: &dyn Navigator) -> Result<String, String> {
        let req = self
            .to_request()
            .map_err(|e| e.user_message("An error occurred while creating the quiz"))?;

        match quiz::create_quiz(api, &req).await {
            Ok(quiz_id) => {
                tracing::info!(%quiz_id, community_id = %req.community_id, "Quiz created");
                navigator.navigate(Route::Community(req.community_id.clone()));
                Ok(quiz_id)
            }
            Err(e) => {
                tracing::error!("Failed to create quiz: {}", e);
                Err(e.user_message("An error occurred while creating the quiz"))
            }
        }
    }
}

/// The create-community form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityDraft {
    pub name: String,
    pub description: String,
    pub allow_public_quiz_submission: bool,
    banner: Option<String>,
}

impl CommunityDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server path of the uploaded banner, if any.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Uploads the banner right away, as soon as it is picked.
    pub async fn attach_banner(&mut self, api: &ApiClient, upload: Upload) -> Result<(), String> {
        upload.ensure_image().map_err(|e| e.user_message(""))?;

        match community::upload_community_banner(api, upload).await {
            Ok(path) if !path.is_empty() => {
                self.banner = Some(path);
                Ok(())
            }
            Ok(_) => Err("Failed to upload image. Please try again".to_string()),
            Err(e) => {
                tracing::error!("Failed to upload banner: {}", e);
                Err("An error occurred while uploading the image".to_string())
            }
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Please enter a community name".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter a community description".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<CreateCommunityRequest, AppError> {
        self.validate()?;
        let req = CreateCommunityRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            banner: self.banner.clone(),
            allow_public_quiz_submission: self.allow_public_quiz_submission,
        };
        req.validate()?;
        Ok(req)
    }

    /// Creates the community and opens it.
    pub async fn submit(&self, api: &ApiClient, navigator: &dyn Navigator) -> Result<String, String> {
        let req = self
            .to_request()
            .map_err(|e| e.user_message("An error occurred while creating the community"))?;

        match community::create_community(api, &req).await {
            Ok(community_id) => {
                tracing::info!(%community_id, "Community created");
                navigator.navigate(Route::Community(community_id.clone()));
                Ok(community_id)
            }
            Err(e) => {
                tracing::error!("Failed to create community: {}", e);
                Err(e.user_message("An error occurred while creating the community"))
            }
        }
    }
}
