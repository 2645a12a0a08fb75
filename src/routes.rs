// src/routes.rs

use std::fmt;
use std::sync::Mutex;

use crate::state::SessionSnapshot;

/// Client-side route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Home,
    Search,
    Communities,
    Community(String),
    CreateCommunity,
    CommunitySettings(String),
    Quiz(String),
    CreateQuiz,
    TakeQuiz(String),
    /// Keyed by attempt id.
    Results(String),
    Leaderboard(String),
    Profile,
    User(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Home => "/home".to_string(),
            Route::Search => "/search".to_string(),
            Route::Communities => "/communities".to_string(),
            Route::Community(id) => format!("/community/{id}"),
            Route::CreateCommunity => "/community/create".to_string(),
            Route::CommunitySettings(id) => format!("/community/{id}/settings"),
            Route::Quiz(id) => format!("/quiz/{id}"),
            Route::CreateQuiz => "/quiz/create".to_string(),
            Route::TakeQuiz(id) => format!("/quiz/{id}/take"),
            Route::Results(id) => format!("/quiz/{id}/results"),
            Route::Leaderboard(id) => format!("/quiz/{id}/leaderboard"),
            Route::Profile => "/profile".to_string(),
            Route::User(id) => format!("/profile/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Landing,
            ["home"] => Route::Home,
            ["search"] => Route::Search,
            ["communities"] => Route::Communities,
            ["community", "create"] => Route::CreateCommunity,
            ["community", id] => Route::Community(id.to_string()),
            ["community", id, "settings"] => Route::CommunitySettings(id.to_string()),
            ["quiz", "create"] => Route::CreateQuiz,
            ["quiz", id] => Route::Quiz(id.to_string()),
            ["quiz", id, "take"] => Route::TakeQuiz(id.to_string()),
            ["quiz", id, "results"] => Route::Results(id.to_string()),
            ["quiz", id, "leaderboard"] => Route::Leaderboard(id.to_string()),
            ["profile"] => Route::Profile,
            ["profile", id] => Route::User(id.to_string()),
            _ => return None,
        };
        Some(route)
    }

    /// Pages that require a signed-in user.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Landing | Route::Search | Route::Community(_) | Route::Quiz(_)
        )
    }

    /// Pages only shown to signed-out visitors.
    pub fn is_public_only(&self) -> bool {
        matches!(self, Route::Landing)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// The session is still loading; show a spinner.
    Wait,
    Redirect(Route),
}

pub fn guard(route: &Route, session: &SessionSnapshot) -> Access {
    if route.is_protected() {
        if session.loading {
            return Access::Wait;
        }
        if session.user.is_none() {
            return Access::Redirect(Route::Landing);
        }
    } else if route.is_public_only() && session.user.is_some() {
        return Access::Redirect(Route::Home);
    }
    Access::Allow
}

/// Where controllers send the user after an action.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every route it is sent to.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.entries.lock().ok()?.last().cloned()
    }

    pub fn entries(&self) -> Vec<Route> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route, "Navigate");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(route);
        }
    }
}
