// src/controllers/home.rs

use crate::{
    api::ApiClient,
    models::{community::CommunityCard, quiz::QuizCard},
    services::{community, quiz},
};

pub const EMPTY_MESSAGE: &str = "Create a quiz or join a community to get started!";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeView {
    pub communities: Vec<CommunityCard>,
    pub quizzes: Vec<QuizCard>,
}

impl HomeView {
    pub fn empty_message(&self) -> Option<&'static str> {
        self.quizzes.is_empty().then_some(EMPTY_MESSAGE)
    }
}

/// Landing page of a signed-in user. Both sections load together; a
/// section whose request fails is shown empty.
pub async fn load_home(api: &ApiClient) -> HomeView {
    let (communities, quizzes) = tokio::join!(
        community::get_recommended_communities(api),
        quiz::get_trending_quizzes(api),
    );

    HomeView {
        communities: communities.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch recommended communities: {}", e);
            Vec::new()
        }),
        quizzes: quizzes.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch trending quizzes: {}", e);
            Vec::new()
        }),
    }
}
