// src/controllers/like.rs

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{api::ApiClient, controllers::InFlight, services::quiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub count: i64,
}

/// What a call to [`LikeToggle::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// Another toggle was still in flight; nothing was sent.
    Busy,
    /// The server confirmed the change.
    Applied(LikeState),
    /// The request failed or the server answered with an unknown status.
    Unchanged(LikeState),
}

/// Like button of a quiz. State only changes once the server confirms.
pub struct LikeToggle {
    api: ApiClient,
    quiz_id: String,
    state: Mutex<LikeState>,
    in_flight: AtomicBool,
}

impl LikeToggle {
    pub fn new(api: ApiClient, quiz_id: impl Into<String>, liked: bool, count: i64) -> Self {
        Self {
            api,
            quiz_id: quiz_id.into(),
            state: Mutex::new(LikeState { liked, count }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> LikeState {
        *self.lock_state()
    }

    // A poisoned lock still holds the last confirmed state.
    fn lock_state(&self) -> MutexGuard<'_, LikeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn toggle(&self) -> LikeOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return LikeOutcome::Busy;
        };

        let res = match quiz::like_quiz(&self.api, &self.quiz_id).await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(quiz_id = %self.quiz_id, "Failed to toggle like: {}", e);
                return LikeOutcome::Unchanged(self.state());
            }
        };

        let mut state = self.lock_state();
        match res.status.as_str() {
            "liked" => {
                state.liked = true;
                state.count += 1;
            }
            "unliked" => {
                state.liked = false;
                state.count -= 1;
            }
            other => {
                tracing::warn!(quiz_id = %self.quiz_id, status = other, "Unexpected like status");
                return LikeOutcome::Unchanged(*state);
            }
        }
        LikeOutcome::Applied(*state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisoned_lock_keeps_the_confirmed_state() {
        let api = ApiClient::builder(url::Url::parse("http://127.0.0.1:9/api").unwrap())
            .build()
            .unwrap();
        let toggle = LikeToggle::new(api, "quiz-1", true, 12);

        let _ = std::thread::scope(|s| {
            s.spawn(|| {
                let _state = toggle.state.lock().unwrap();
                panic!("poison the lock");
            })
            .join()
        });

        assert!(toggle.state.is_poisoned());
        assert_eq!(toggle.state(), LikeState { liked: true, count: 12 });
    }

    #[tokio::test]
    async fn failed_request_reports_the_confirmed_state() {
        let api = ApiClient::builder(url::Url::parse("http://127.0.0.1:9/api").unwrap())
            .build()
            .unwrap();
        let toggle = LikeToggle::new(api, "quiz-1", true, 12);

        assert_eq!(
            toggle.toggle().await,
            LikeOutcome::Unchanged(LikeState { liked: true, count: 12 })
        );
        assert!(!toggle.is_pending());
    }
}
