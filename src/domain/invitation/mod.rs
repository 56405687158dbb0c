//! Invitation domain - pending offers of membership

mod entity;
mod repository;

pub use entity::{Invitation, InvitationId, InvitationStatus, DEFAULT_EXPIRY_DAYS};
pub use repository::InvitationRepository;

#[cfg(test)]
pub use repository::mock::MockInvitationRepository;
