//! Pulseboard API
//!
//! Organization-scoped team management with role-based authorization:
//! - Per-organization memberships with owner/admin/member/viewer roles
//! - Email invitations with expiry and uniqueness guarantees
//! - Idempotent workspace provisioning on first sign-in

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::invitation::Invitation;
use domain::member::Membership;
use domain::organization::Organization;
use domain::user::User;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::invitation::StorageInvitationRepository;
use infrastructure::member::StorageMembershipRepository;
use infrastructure::notification::LogNotifier;
use infrastructure::organization::{OrganizationService, StorageOrganizationRepository};
use infrastructure::storage::{PostgresConfig, StorageFactory, StorageKind};
use infrastructure::team::{
    InvitationLifecycle, MembershipMutator, PermissionEvaluator, TeamDirectory,
};
use infrastructure::user::StorageUserRepository;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let kind = StorageKind::parse(&config.storage.kind)
        .ok_or_else(|| anyhow::anyhow!("Unknown storage kind: {}", config.storage.kind))?;

    info!("Storage backend: {:?}", kind);

    let factory = match kind {
        StorageKind::InMemory => StorageFactory::in_memory(),
        StorageKind::Postgres => {
            let pg = PostgresConfig {
                url: config.storage.postgres.url.clone(),
                max_connections: config.storage.postgres.max_connections,
                connect_timeout_secs: config.storage.postgres.connect_timeout_secs,
            };
            StorageFactory::postgres(&pg).await?
        }
    };

    let organizations = Arc::new(StorageOrganizationRepository::new(
        factory.create::<Organization>("organizations").await?,
    ));
    let memberships = Arc::new(StorageMembershipRepository::new(
        factory.create::<Membership>("memberships").await?,
    ));
    let invitations = Arc::new(StorageInvitationRepository::new(
        factory.create::<Invitation>("invitations").await?,
    ));
    let users = Arc::new(StorageUserRepository::new(
        factory.create::<User>("users").await?,
    ));

    let permissions = PermissionEvaluator::new(memberships.clone());

    let organization_service = OrganizationService::new(
        organizations.clone(),
        memberships.clone(),
        users.clone(),
    );

    let directory = TeamDirectory::new(memberships.clone(), invitations.clone(), users.clone());

    let lifecycle = InvitationLifecycle::new(
        invitations,
        memberships.clone(),
        organizations,
        users,
        permissions.clone(),
        Arc::new(LogNotifier::new()),
        config.invitations.expiry_days,
    );

    let mutator = MembershipMutator::new(memberships, permissions.clone());

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    )));

    Ok(AppState::new(
        organization_service,
        permissions,
        directory,
        lifecycle,
        mutator,
        jwt_service,
    ))
}
