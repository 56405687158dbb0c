//! Team endpoint request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::invitation::Invitation;
use crate::domain::member::OrgRole;
use crate::infrastructure::team::TeamMember;

/// One roster entry as returned by the team endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberResponse {
    pub membership_id: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: OrgRole,
    pub joined_at: DateTime<Utc>,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            membership_id: member.membership.id().as_str().to_string(),
            user_id: member.user.id().as_str().to_string(),
            email: member.user.email().to_string(),
            name: member.user.name().to_string(),
            role: member.membership.role(),
            joined_at: member.membership.created_at(),
        }
    }
}

/// A pending invitation as returned by the team endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationResponse {
    pub invitation_id: String,
    pub email: String,
    pub role: OrgRole,
    pub invited_by: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            invitation_id: invitation.id().as_str().to_string(),
            email: invitation.email().to_string(),
            role: invitation.role(),
            invited_by: invitation.invited_by().as_str().to_string(),
            created_at: invitation.created_at(),
            expires_at: invitation.expires_at(),
        }
    }
}

/// Full team view: current members plus invitations awaiting acceptance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub members: Vec<TeamMemberResponse>,
    pub invitations: Vec<InvitationResponse>,
    pub total_members: usize,
    pub pending_invitations: usize,
}

impl TeamResponse {
    pub fn new(members: Vec<TeamMemberResponse>, invitations: Vec<InvitationResponse>) -> Self {
        Self {
            total_members: members.len(),
            pending_invitations: invitations.len(),
            members,
            invitations,
        }
    }
}

/// Team mutation dispatched by the `action` discriminator
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TeamActionRequest {
    Invite {
        email: String,
        role: OrgRole,
    },
    UpdateRole {
        membership_id: String,
        role: OrgRole,
    },
    RemoveMember {
        membership_id: String,
    },
    CancelInvitation {
        invitation_id: String,
    },
}

/// Uniform acknowledgement for team actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamActionResponse {
    pub success: bool,
    pub message: String,
}

impl TeamActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
