// src/controllers/profile.rs

use crate::{
    api::{ApiClient, Upload},
    error::AppError,
    models::user::{Profile, ProfileAttempt, ProfileCommunity, UpdateProfileRequest},
    services::user,
    state::Session,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub attempts: usize,
    pub communities: usize,
    /// Mean percentage over all attempts; zero without attempts.
    pub average_percentage: f64,
    pub best_percentage: f64,
}

impl ProfileStats {
    pub fn from_profile(profile: &Profile) -> Self {
        let attempts = &profile.attempts;
        let (sum, best) = attempts
            .iter()
            .fold((0.0, 0.0_f64), |(sum, best), a| (sum + a.percentage, best.max(a.percentage)));
        Self {
            attempts: attempts.len(),
            communities: profile.communities.len(),
            average_percentage: if attempts.is_empty() {
                0.0
            } else {
                sum / attempts.len() as f64
            },
            best_percentage: best,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Quizzes,
    Communities,
}

/// The signed-in user's own page.
pub struct ProfilePage {
    api: ApiClient,
    session: Session,
    profile: Profile,
    tab: ProfileTab,
}

impl ProfilePage {
    pub async fn load(api: &ApiClient, session: &Session) -> Result<Self, AppError> {
        let profile = user::get_user_profile(api).await?;
        session.set_user(Some(profile.clone()));
        Ok(Self {
            api: api.clone(),
            session: session.clone(),
            profile,
            tab: ProfileTab::default(),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn stats(&self) -> ProfileStats {
        ProfileStats::from_profile(&self.profile)
    }

    pub fn attempts(&self) -> &[ProfileAttempt] {
        &self.profile.attempts
    }

    pub fn communities(&self) -> &[ProfileCommunity] {
        &self.profile.communities
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }

    pub fn show(&mut self, tab: ProfileTab) {
        self.tab = tab;
    }

    /// Saves a new username; blank or unchanged names are ignored.
    pub async fn rename(&mut self, username: &str) -> Result<bool, AppError> {
        let username = username.trim();
        if username.is_empty() || username == self.profile.username {
            return Ok(false);
        }
        let req = UpdateProfileRequest {
            username: Some(username.to_string()),
            ..Default::default()
        };
        validator::Validate::validate(&req)?;
        user::update_profile(&self.api, &req).await?;

        self.profile.username = username.to_string();
        self.session.set_user(Some(self.profile.clone()));
        Ok(true)
    }

    pub async fn change_avatar(&mut self, upload: Upload) -> Result<(), AppError> {
        let avatar = user::upload_avatar(&self.api, upload).await?;
        self.profile.avatar = Some(avatar);
        self.session.set_user(Some(self.profile.clone()));
        Ok(())
    }

    pub async fn change_banner(&mut self, upload: Upload) -> Result<(), AppError> {
        let banner = user::upload_banner(&self.api, upload).await?;
        self.profile.banner = Some(banner);
        self.session.set_user(Some(self.profile.clone()));
        Ok(())
    }
}

/// Another user's public page.
pub async fn load_user(api: &ApiClient, id: &str) -> Result<(Profile, ProfileStats), AppError> {
    let profile = user::get_user_by_id(api, id).await?;
    let stats = ProfileStats::from_profile(&profile);
    Ok((profile, stats))
}
