//! Invitation infrastructure

mod repository;

pub use repository::StorageInvitationRepository;
