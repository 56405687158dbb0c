//! Organization infrastructure

mod repository;
mod service;

pub use repository::StorageOrganizationRepository;
pub use service::OrganizationService;
