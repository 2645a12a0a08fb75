// src/controllers/membership.rs

use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    api::ApiClient, controllers::InFlight, models::community::MemberRole, services::community,
};

/// The button shown next to a community for a given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Join,
    Leave,
}

impl MembershipAction {
    /// `None` for the creator, who can neither join nor leave.
    pub fn for_role(role: MemberRole) -> Option<Self> {
        match role {
            MemberRole::Creator => None,
            MemberRole::Admin | MemberRole::Member => Some(MembershipAction::Leave),
            MemberRole::NonMember => Some(MembershipAction::Join),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipAction::Join => "Join",
            MembershipAction::Leave => "Leave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    Busy,
    /// No control is offered for this role.
    NoAction,
    Applied(MemberRole),
    Unchanged(MemberRole),
}

/// Join/leave control of one community. The role only moves on a
/// server-confirmed `"joined"` or `"left"`.
pub struct MembershipToggle {
    api: ApiClient,
    community_id: String,
    role: Mutex<MemberRole>,
    in_flight: AtomicBool,
}

impl MembershipToggle {
    pub fn new(api: ApiClient, community_id: impl Into<String>, role: MemberRole) -> Self {
        Self {
            api,
            community_id: community_id.into(),
            role: Mutex::new(role),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn role(&self) -> MemberRole {
        *self.role.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn action(&self) -> Option<MembershipAction> {
        MembershipAction::for_role(self.role())
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn toggle(&self) -> MembershipOutcome {
        let Some(action) = self.action() else {
            return MembershipOutcome::NoAction;
        };
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return MembershipOutcome::Busy;
        };

        let res = match action {
            MembershipAction::Join => community::join_community(&self.api, &self.community_id).await,
            MembershipAction::Leave => community::leave_community(&self.api, &self.community_id).await,
        };
        let status = match res {
            Ok(res) => res.status,
            Err(e) => {
                tracing::error!(
                    community_id = %self.community_id,
                    "Failed to {} community: {}",
                    action.label().to_lowercase(),
                    e
                );
                return MembershipOutcome::Unchanged(self.role());
            }
        };

        let next = match status.as_str() {
            "joined" => MemberRole::Member,
            "left" => MemberRole::NonMember,
            other => {
                tracing::warn!(community_id = %self.community_id, status = other, "Unexpected membership status");
                return MembershipOutcome::Unchanged(self.role());
            }
        };
        *self.role.lock().unwrap_or_else(PoisonError::into_inner) = next;
        tracing::info!(community_id = %self.community_id, role = %next, "Membership changed");
        MembershipOutcome::Applied(next)
    }
}
