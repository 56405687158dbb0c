//! Team endpoints - roster reads and membership mutations

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, TeamActionRequest, TeamActionResponse, TeamResponse};
use crate::domain::invitation::InvitationId;
use crate::domain::member::{Capability, MembershipId};
use crate::domain::organization::OrganizationId;

/// GET /orgs/{org_id}/team - members plus pending invitations
pub async fn get_team(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    RequireUser(identity): RequireUser,
) -> Result<Json<TeamResponse>, ApiError> {
    let organization_id = parse_org_id(&org_id)?;

    state
        .permissions
        .require(&organization_id, &identity.user_id, Capability::ViewTeam)
        .await?;

    let members = state.directory.team_members(&organization_id).await?;
    let pending = state
        .directory
        .pending_invitations(&organization_id)
        .await?;

    Ok(Json(TeamResponse::new(
        members.into_iter().map(Into::into).collect(),
        pending.into_iter().map(Into::into).collect(),
    )))
}

/// POST /orgs/{org_id}/team - dispatch a team mutation by `action`
pub async fn team_action(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    RequireUser(identity): RequireUser,
    Json(request): Json<TeamActionRequest>,
) -> Result<Response, ApiError> {
    let organization_id = parse_org_id(&org_id)?;
    let caller = &identity.user_id;

    match request {
        TeamActionRequest::Invite { email, role } => {
            let invitation = state
                .invitations
                .invite(&organization_id, &email, role, caller)
                .await?;

            Ok((
                StatusCode::CREATED,
                Json(TeamActionResponse::ok(format!(
                    "Invitation sent to {}",
                    invitation.email()
                ))),
            )
                .into_response())
        }
        TeamActionRequest::UpdateRole {
            membership_id,
            role,
        } => {
            let membership_id = MembershipId::new(membership_id)?;
            let updated = state
                .memberships
                .update_role(&organization_id, &membership_id, role, caller)
                .await?;

            Ok(Json(TeamActionResponse::ok(format!(
                "Role updated to {}",
                updated.role()
            )))
            .into_response())
        }
        TeamActionRequest::RemoveMember { membership_id } => {
            let membership_id = MembershipId::new(membership_id)?;
            state
                .memberships
                .remove(&organization_id, &membership_id, caller)
                .await?;

            Ok(Json(TeamActionResponse::ok("Member removed")).into_response())
        }
        TeamActionRequest::CancelInvitation { invitation_id } => {
            let invitation_id = InvitationId::new(invitation_id)?;
            state
                .invitations
                .cancel(&organization_id, &invitation_id, caller)
                .await?;

            Ok(Json(TeamActionResponse::ok("Invitation cancelled")).into_response())
        }
    }
}

fn parse_org_id(org_id: &str) -> Result<OrganizationId, ApiError> {
    OrganizationId::new(org_id).map_err(|e| ApiError::bad_request(e.to_string()))
}
