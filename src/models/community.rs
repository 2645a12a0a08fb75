// src/models/community.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::QuizCard;

/// Role of the signed-in user inside a community.
///
/// The API spells it `CREATOR`/`ADMIN`/`MEMBER`/`NON_MEMBER` on community
/// pages and lowercase in member lists; anything unrecognised is treated as
/// not being a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberRole {
    Creator,
    Admin,
    Member,
    #[default]
    NonMember,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Creator => "CREATOR",
            MemberRole::Admin => "ADMIN",
            MemberRole::Member => "MEMBER",
            MemberRole::NonMember => "NON_MEMBER",
        }
    }

    /// Members may publish quizzes in the community; outsiders may not.
    pub fn is_member(&self) -> bool {
        !matches!(self, MemberRole::NonMember)
    }
}

impl From<&str> for MemberRole {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CREATOR" => MemberRole::Creator,
            "ADMIN" => MemberRole::Admin,
            "MEMBER" | "JOINED" => MemberRole::Member,
            _ => MemberRole::NonMember,
        }
    }
}

impl From<String> for MemberRole {
    fn from(raw: String) -> Self {
        MemberRole::from(raw.as_str())
    }
}

impl From<MemberRole> for String {
    fn from(role: MemberRole) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityCreator {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: String,
    pub role: MemberRole,
}

/// Community as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub creator: Option<CommunityCreator>,
    #[serde(default)]
    pub allow_public_quiz_submission: bool,
    #[serde(default)]
    pub number_of_members: Option<u32>,
    #[serde(default)]
    pub number_of_quizzes: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub member_role: MemberRole,
}

#[derive(Debug, Deserialize)]
pub struct CommunityListResponse {
    #[serde(default)]
    pub communities: Option<Vec<CommunityCard>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub member_role: MemberRole,
    pub creator: Option<CommunityCreator>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub allow_public_quiz_submission: bool,
    #[serde(default)]
    pub created_at: String,
}

/// `GET /communities/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityDetailResponse {
    pub community: CommunityDetails,
    #[serde(default)]
    pub quizzes: Option<Vec<QuizCard>>,
}

/// `POST /communities/:id/join` and `/leave`.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipResponse {
    #[serde(default)]
    pub status: String,
}

/// DTO for creating a community.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 100, message = "Please enter a community name"))]
    pub name: String,
    #[validate(length(min = 1, max = 1000, message = "Please enter a community description"))]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub allow_public_quiz_submission: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommunityResponse {
    pub community_id: String,
}

/// Role a moderator can assign to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignableRole {
    Admin,
    Member,
}

#[derive(Debug, Serialize)]
pub struct UpdateMemberRoleRequest {
    pub role: AssignableRole,
}

#[derive(Debug, Deserialize)]
pub struct BannerUploadResponse {
    pub url: String,
}
