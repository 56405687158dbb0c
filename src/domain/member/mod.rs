//! Membership domain - (user, organization, role) bindings

mod entity;
mod repository;

pub use entity::{Capability, Membership, MembershipId, OrgRole};
pub use repository::MembershipRepository;

#[cfg(test)]
pub use repository::mock::MockMembershipRepository;
