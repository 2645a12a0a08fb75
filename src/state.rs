// src/state.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    api::ApiClient,
    config::Config,
    error::AppError,
    models::user::{LoginRequest, Profile, RegisterRequest},
    services::{auth, user},
};

/// What every view knows about the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<Profile>,
    /// True until the first profile fetch has settled.
    pub loading: bool,
}

/// Application-wide store for the signed-in user.
///
/// Readable from anywhere through `snapshot`/`subscribe`; written only
/// through the setters. Clones share the same store.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl Session {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionSnapshot {
            user: None,
            loading: true,
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<Profile> {
        self.tx.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    pub fn set_user(&self, user: Option<Profile>) {
        self.tx.send_modify(|s| s.user = user);
    }

    pub fn set_loading(&self, loading: bool) {
        self.tx.send_modify(|s| s.loading = loading);
    }

    /// Forgets the user; the session counts as settled afterwards.
    pub fn clear(&self) {
        self.tx.send_modify(|s| {
            s.user = None;
            s.loading = false;
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a controller needs from the application: the API client,
/// the configuration and the shared session.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub config: Config,
    pub session: Session,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            api,
            config,
            session: Session::new(),
        })
    }

    pub fn with_client(config: Config, api: ApiClient) -> Self {
        Self {
            api,
            config,
            session: Session::new(),
        }
    }

    /// Populates the session with one profile fetch. A failure (usually a
    /// 401 when no cookie is set) leaves the user signed out.
    pub async fn bootstrap(&self) {
        self.session.set_loading(true);
        match user::get_user_profile(&self.api).await {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id, "Session restored");
                self.session.set_user(Some(profile));
            }
            Err(e) => {
                tracing::debug!("No active session: {}", e);
                self.session.set_user(None);
            }
        }
        self.session.set_loading(false);
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<Profile, AppError> {
        auth::login(&self.api, req).await?;
        self.reload_profile().await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<Profile, AppError> {
        auth::register(&self.api, req).await?;
        self.reload_profile().await
    }

    /// Ends the session. Local state is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), AppError> {
        let res = auth::logout(&self.api).await;
        self.session.clear();
        if let Err(e) = &res {
            tracing::warn!("Logout request failed: {}", e);
        }
        res
    }

    async fn reload_profile(&self) -> Result<Profile, AppError> {
        let profile = user::get_user_profile(&self.api).await?;
        self.session.set_user(Some(profile.clone()));
        self.session.set_loading(false);
        Ok(profile)
    }
}
