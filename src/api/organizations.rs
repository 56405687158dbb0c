//! Organization endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, OrganizationResponse};
use crate::domain::member::Capability;
use crate::domain::organization::OrganizationId;

/// POST /orgs/default - ensure the caller has a workspace.
///
/// Safe to call on every sign-in; returns the existing organization when one
/// is already there.
pub async fn ensure_default_organization(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
) -> Result<(StatusCode, Json<OrganizationResponse>), ApiError> {
    let organization = state
        .organization_service
        .ensure_default_for(&identity)
        .await?;

    Ok((StatusCode::OK, Json(organization.into())))
}

/// GET /orgs/{org_id} - fetch an organization the caller belongs to
pub async fn get_organization(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    RequireUser(identity): RequireUser,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let organization_id =
        OrganizationId::new(org_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    state
        .permissions
        .require(&organization_id, &identity.user_id, Capability::ViewTeam)
        .await?;

    let organization = state.organization_service.get(&organization_id).await?;
    Ok(Json(organization.into()))
}
