// src/controllers/community.rs

use crate::{
    api::ApiClient,
    controllers::membership::{MembershipAction, MembershipOutcome, MembershipToggle},
    error::AppError,
    models::{
        community::{CommunityDetails, Member, MemberRole},
        quiz::QuizCard,
    },
    services::community,
    utils::{assets, time},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Quizzes,
    Members,
}

/// A community page: header, join/leave control and a quizzes/members switch.
pub struct CommunityPage {
    api: ApiClient,
    community: CommunityDetails,
    quizzes: Vec<QuizCard>,
    membership: MembershipToggle,
    section: Section,
}

impl CommunityPage {
    pub async fn load(api: &ApiClient, id: &str) -> Result<Self, AppError> {
        let res = community::get_community(api, id).await?;
        let membership = MembershipToggle::new(api.clone(), id, res.community.member_role);
        Ok(Self {
            api: api.clone(),
            quizzes: res.quizzes.unwrap_or_default(),
            community: res.community,
            membership,
            section: Section::default(),
        })
    }

    pub fn community(&self) -> &CommunityDetails {
        &self.community
    }

    pub fn quizzes(&self) -> &[QuizCard] {
        &self.quizzes
    }

    pub fn members(&self) -> &[Member] {
        &self.community.members
    }

    pub fn banner_url(&self) -> String {
        assets::banner_url(self.api.base_url(), self.community.banner.as_deref())
    }

    pub fn created_on(&self) -> String {
        time::format_date(&self.community.created_at)
    }

    pub fn role(&self) -> MemberRole {
        self.membership.role()
    }

    pub fn membership_action(&self) -> Option<MembershipAction> {
        self.membership.action()
    }

    pub async fn toggle_membership(&self) -> MembershipOutcome {
        self.membership.toggle().await
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn show(&mut self, section: Section) {
        self.section = section;
    }
}
