// src/controllers/search.rs

use std::fmt;
use std::str::FromStr;

use crate::{
    api::ApiClient,
    error::AppError,
    models::{SearchParams, community::CommunityCard, quiz::QuizCard},
    services::{community, quiz},
};

pub const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    Quizzes,
    Communities,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchKind::Quizzes => "quizzes",
            SearchKind::Communities => "communities",
        })
    }
}

impl FromStr for SearchKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quizzes" => Ok(SearchKind::Quizzes),
            "communities" => Ok(SearchKind::Communities),
            other => Err(AppError::Validation(format!("Unknown search type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub kind: SearchKind,
    /// Only applies to communities.
    pub subject: Option<String>,
}

impl SearchQuery {
    fn params(&self) -> SearchParams {
        let text = self.text.trim();
        SearchParams {
            search: (!text.is_empty()).then(|| text.to_string()),
            subject: match self.kind {
                SearchKind::Communities => self.subject.clone().filter(|s| !s.is_empty()),
                SearchKind::Quizzes => None,
            },
            page: None,
            limit: Some(SEARCH_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Quizzes(Vec<QuizCard>),
    Communities(Vec<CommunityCard>),
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        match self {
            SearchResults::Quizzes(q) => q.is_empty(),
            SearchResults::Communities(c) => c.is_empty(),
        }
    }
}

/// Runs a search; a failed request shows as no results.
pub async fn search(api: &ApiClient, query: &SearchQuery) -> SearchResults {
    let params = query.params();
    match query.kind {
        SearchKind::Quizzes => SearchResults::Quizzes(
            quiz::list_quizzes(api, &params)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Search failed: {}", e);
                    Vec::new()
                }),
        ),
        SearchKind::Communities => SearchResults::Communities(
            community::list_communities(api, &params)
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Search failed: {}", e);
                    Vec::new()
                }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_only_filters_communities() {
        let mut query = SearchQuery {
            text: "  solar ".into(),
            kind: SearchKind::Quizzes,
            subject: Some("Energy".into()),
        };
        let params = query.params();
        assert_eq!(params.search.as_deref(), Some("solar"));
        assert_eq!(params.subject, None);
        assert_eq!(params.limit, Some(SEARCH_LIMIT));

        query.kind = SearchKind::Communities;
        assert_eq!(query.params().subject.as_deref(), Some("Energy"));
    }

    #[test]
    fn kinds_parse() {
        assert_eq!("communities".parse::<SearchKind>().unwrap(), SearchKind::Communities);
        assert!("people".parse::<SearchKind>().is_err());
    }
}
