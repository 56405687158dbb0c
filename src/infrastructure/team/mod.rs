//! Team management services

mod directory;
mod invitation;
mod membership;
mod permission;

pub use directory::{TeamDirectory, TeamMember};
pub use invitation::InvitationLifecycle;
pub use membership::MembershipMutator;
pub use permission::PermissionEvaluator;
