//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::JwtService;
use crate::infrastructure::organization::OrganizationService;
use crate::infrastructure::team::{
    InvitationLifecycle, MembershipMutator, PermissionEvaluator, TeamDirectory,
};

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub organization_service: OrganizationService,
    pub permissions: PermissionEvaluator,
    pub directory: TeamDirectory,
    pub invitations: InvitationLifecycle,
    pub memberships: MembershipMutator,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        organization_service: OrganizationService,
        permissions: PermissionEvaluator,
        directory: TeamDirectory,
        invitations: InvitationLifecycle,
        memberships: MembershipMutator,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            organization_service,
            permissions,
            directory,
            invitations,
            memberships,
            jwt_service,
        }
    }
}
