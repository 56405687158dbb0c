//! Domain layer - Core business entities and repository contracts

pub mod error;
pub mod invitation;
pub mod member;
pub mod notification;
pub mod organization;
pub mod storage;
pub mod user;

pub use error::DomainError;
pub use invitation::{Invitation, InvitationId, InvitationStatus};
pub use member::{Capability, Membership, MembershipId, OrgRole};
pub use notification::Notifier;
pub use organization::{Organization, OrganizationId, SubscriptionTier};
pub use storage::{Storage, StorageEntity, StorageKey, UniqueGuard};
pub use user::{Identity, User, UserId};
