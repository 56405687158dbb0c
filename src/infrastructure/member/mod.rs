//! Membership infrastructure

mod repository;

pub use repository::StorageMembershipRepository;
