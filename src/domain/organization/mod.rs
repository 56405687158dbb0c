//! Organization domain - tenant boundary

mod entity;
mod repository;
mod validation;

pub use entity::{Organization, OrganizationId, SubscriptionTier};
pub use repository::OrganizationRepository;
pub use validation::{
    slugify, validate_organization_id, validate_organization_name, validate_slug,
    OrganizationValidationError,
};

#[cfg(test)]
pub use repository::mock::MockOrganizationRepository;
