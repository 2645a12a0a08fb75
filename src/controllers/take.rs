// src/controllers/take.rs

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use crate::{
    api::ApiClient,
    controllers::attempt::{Attempt, AttemptView, Tick},
    error::AppError,
    models::{attempt::SubmitQuizRequest, quiz::TakeQuiz},
    routes::{Navigator, Route},
    services::quiz,
    utils::{
        scope::{Scope, ScopeHandle},
        ticker::Ticker,
    },
};

/// Remote side of an attempt: load the quiz, store the answers.
#[async_trait]
pub trait AttemptBackend: Send + Sync {
    async fn load(&self, quiz_id: &str) -> Result<TakeQuiz, AppError>;

    /// Returns the id of the stored attempt.
    async fn submit(&self, quiz_id: &str, payload: &SubmitQuizRequest) -> Result<String, AppError>;
}

#[async_trait]
impl AttemptBackend for ApiClient {
    async fn load(&self, quiz_id: &str) -> Result<TakeQuiz, AppError> {
        quiz::get_quiz_for_taking(self, quiz_id).await
    }

    async fn submit(&self, quiz_id: &str, payload: &SubmitQuizRequest) -> Result<String, AppError> {
        quiz::submit_quiz_attempt(self, quiz_id, payload).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TakeView {
    Loading,
    /// The quiz could not be fetched; there is no retry.
    LoadFailed(String),
    Ready(AttemptView),
}

enum State {
    Loading,
    LoadFailed(AppError),
    Ready(Attempt),
}

impl State {
    fn view(&self) -> TakeView {
        match self {
            State::Loading => TakeView::Loading,
            State::LoadFailed(e) => TakeView::LoadFailed(e.user_message("Failed to load quiz")),
            State::Ready(attempt) => TakeView::Ready(attempt.view()),
        }
    }
}

struct Shared {
    quiz_id: String,
    backend: Arc<dyn AttemptBackend>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<State>,
    view: watch::Sender<TakeView>,
    scope: ScopeHandle,
}

impl Shared {
    fn publish(&self, state: &State) {
        self.view.send_replace(state.view());
    }

    async fn on_tick(&self) -> ControlFlow<()> {
        let tick = {
            let mut state = self.state.lock().await;
            let State::Ready(attempt) = &mut *state else {
                return ControlFlow::Break(());
            };
            let tick = attempt.tick();
            self.publish(&state);
            tick
        };

        match tick {
            Tick::Running(_) | Tick::Held => ControlFlow::Continue(()),
            Tick::Stopped => ControlFlow::Break(()),
            Tick::Expired => {
                tracing::info!(quiz_id = %self.quiz_id, "Time is up, submitting attempt");
                // Errors are already logged and recorded in the view.
                let _ = self.submit().await;
                ControlFlow::Break(())
            }
        }
    }

    /// `Ok(None)` when nothing was sent: a submission is already in flight
    /// or finished, or the view is gone.
    async fn submit(&self) -> Result<Option<String>, AppError> {
        let payload = {
            let mut state = self.state.lock().await;
            let State::Ready(attempt) = &mut *state else {
                return Ok(None);
            };
            let Some(payload) = attempt.begin_submit() else {
                tracing::debug!(quiz_id = %self.quiz_id, "Submission already in progress");
                return Ok(None);
            };
            self.publish(&state);
            payload
        };

        tracing::info!(
            quiz_id = %self.quiz_id,
            answers = payload.answers.len(),
            minutes = payload.duration_minutes,
            "Submitting quiz attempt"
        );

        let Some(res) = self
            .scope
            .run(self.backend.submit(&self.quiz_id, &payload))
            .await
        else {
            return Ok(None);
        };

        let mut state = self.state.lock().await;
        let State::Ready(attempt) = &mut *state else {
            return Ok(None);
        };
        match res {
            Ok(attempt_id) => {
                attempt.complete(attempt_id.clone());
                self.publish(&state);
                drop(state);
                self.navigator.navigate(Route::Results(attempt_id.clone()));
                Ok(Some(attempt_id))
            }
            Err(e) => {
                tracing::error!(quiz_id = %self.quiz_id, "Failed to submit quiz: {}", e);
                attempt.fail(e.clone());
                self.publish(&state);
                Err(e)
            }
        }
    }
}

/// Drives one timed attempt from load to submission.
///
/// * Loads the quiz and starts a one-second countdown.
/// * Submits exactly once, either on request or when the clock hits zero.
/// * Hands the stored attempt id to the navigator.
///
/// Dropping the controller stops the countdown and discards any response
/// still in flight.
pub struct TakeQuizController {
    shared: Arc<Shared>,
    ticker: StdMutex<Option<Ticker>>,
    scope: Scope,
}

impl TakeQuizController {
    pub fn new(
        quiz_id: impl Into<String>,
        backend: Arc<dyn AttemptBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let scope = Scope::new();
        let (view, _) = watch::channel(TakeView::Loading);
        let shared = Arc::new(Shared {
            quiz_id: quiz_id.into(),
            backend,
            navigator,
            state: Mutex::new(State::Loading),
            view,
            scope: scope.handle(),
        });

        Self {
            shared,
            ticker: StdMutex::new(None),
            scope,
        }
    }

    /// `new` followed by `load`; a load failure is reported through the view.
    pub async fn mount(
        quiz_id: impl Into<String>,
        backend: Arc<dyn AttemptBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let controller = Self::new(quiz_id, backend, navigator);
        if let Err(e) = controller.load().await {
            tracing::error!("Failed to load quiz: {}", e);
        }
        controller
    }

    pub fn quiz_id(&self) -> &str {
        &self.shared.quiz_id
    }

    /// Fetches the quiz once. A loaded or failed controller refuses to load
    /// again, so a live attempt is never replaced.
    pub async fn load(&self) -> Result<(), AppError> {
        let shared = &self.shared;
        if !matches!(*shared.state.lock().await, State::Loading) {
            return Err(AppError::Conflict("The quiz is already loaded".to_string()));
        }

        let Some(res) = shared.scope.run(shared.backend.load(&shared.quiz_id)).await else {
            return Ok(());
        };

        let mut state = shared.state.lock().await;
        // A concurrent load finished first.
        if !matches!(*state, State::Loading) {
            return Err(AppError::Conflict("The quiz is already loaded".to_string()));
        }
        match res {
            Ok(quiz) => {
                let attempt = Attempt::new(quiz);
                let timed = attempt.is_timed();
                *state = State::Ready(attempt);
                shared.publish(&state);
                drop(state);
                if timed {
                    self.start_ticker();
                }
                Ok(())
            }
            Err(e) => {
                *state = State::LoadFailed(e.clone());
                shared.publish(&state);
                Err(e)
            }
        }
    }

    fn start_ticker(&self) {
        let weak = Arc::downgrade(&self.shared);
        let ticker = Ticker::spawn(Duration::from_secs(1), move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(shared) => shared.on_tick().await,
                    None => ControlFlow::Break(()),
                }
            }
        });
        if let Ok(mut slot) = self.ticker.lock() {
            *slot = Some(ticker);
        }
    }

    fn stop_ticker(&self) {
        if let Ok(mut slot) = self.ticker.lock() {
            slot.take();
        }
    }

    pub fn view(&self) -> TakeView {
        self.shared.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TakeView> {
        self.shared.view.subscribe()
    }

    pub async fn select_answer(&self, question_id: &str, option_id: &str) -> Result<(), AppError> {
        self.with_attempt(|attempt| attempt.select_answer(question_id, option_id))
            .await?
    }

    pub async fn go_to_next(&self) -> bool {
        self.with_attempt(Attempt::go_to_next).await.unwrap_or(false)
    }

    pub async fn go_to_previous(&self) -> bool {
        self.with_attempt(Attempt::go_to_previous).await.unwrap_or(false)
    }

    pub async fn go_to_question(&self, index: usize) -> bool {
        self.with_attempt(|attempt| attempt.go_to_question(index))
            .await
            .unwrap_or(false)
    }

    pub async fn confirm_prompt(&self) -> Option<String> {
        self.with_attempt(|attempt| attempt.confirm_prompt()).await.ok()
    }

    /// Submits the current answers. Returns the attempt id when this call
    /// stored the attempt and `Ok(None)` when another submission already
    /// owns the attempt.
    pub async fn submit(&self) -> Result<Option<String>, AppError> {
        let res = self.shared.submit().await;
        if matches!(res, Ok(Some(_))) {
            self.stop_ticker();
        }
        res
    }

    /// Tears the view down: stops the countdown and ignores late responses.
    pub fn close(&self) {
        self.stop_ticker();
        self.scope.close();
    }

    async fn with_attempt<R>(&self, f: impl FnOnce(&mut Attempt) -> R) -> Result<R, AppError> {
        let mut state = self.shared.state.lock().await;
        let State::Ready(attempt) = &mut *state else {
            return Err(AppError::Validation("The quiz is not loaded".to_string()));
        };
        let out = f(attempt);
        self.shared.publish(&state);
        Ok(out)
    }
}

impl Drop for TakeQuizController {
    fn drop(&mut self) {
        self.close();
    }
}
