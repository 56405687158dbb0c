//! Organization validation

use thiserror::Error;

/// Errors that can occur during organization validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrganizationValidationError {
    #[error("Organization ID cannot be empty")]
    EmptyId,

    #[error("Organization ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Organization ID can only contain lowercase alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Organization ID cannot start or end with a hyphen")]
    InvalidIdFormat,

    #[error("Organization slug cannot be empty")]
    EmptySlug,

    #[error("Organization slug cannot exceed {0} characters")]
    SlugTooLong(usize),

    #[error("Organization slug can only contain lowercase alphanumeric characters and hyphens")]
    InvalidSlugCharacters,

    #[error("Organization slug cannot start or end with a hyphen")]
    InvalidSlugFormat,

    #[error("Organization name cannot be empty")]
    EmptyName,

    #[error("Organization name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_ORGANIZATION_ID_LENGTH: usize = 50;
const MAX_SLUG_LENGTH: usize = 50;
const MAX_ORGANIZATION_NAME_LENGTH: usize = 100;

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

/// Validate an organization ID
pub fn validate_organization_id(id: &str) -> Result<(), OrganizationValidationError> {
    if id.is_empty() {
        return Err(OrganizationValidationError::EmptyId);
    }

    if id.len() > MAX_ORGANIZATION_ID_LENGTH {
        return Err(OrganizationValidationError::IdTooLong(
            MAX_ORGANIZATION_ID_LENGTH,
        ));
    }

    if !id.chars().all(is_slug_char) {
        return Err(OrganizationValidationError::InvalidIdCharacters);
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(OrganizationValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Validate an organization slug
pub fn validate_slug(slug: &str) -> Result<(), OrganizationValidationError> {
    if slug.is_empty() {
        return Err(OrganizationValidationError::EmptySlug);
    }

    if slug.len() > MAX_SLUG_LENGTH {
        return Err(OrganizationValidationError::SlugTooLong(MAX_SLUG_LENGTH));
    }

    if !slug.chars().all(is_slug_char) {
        return Err(OrganizationValidationError::InvalidSlugCharacters);
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(OrganizationValidationError::InvalidSlugFormat);
    }

    Ok(())
}

/// Validate an organization display name
pub fn validate_organization_name(name: &str) -> Result<(), OrganizationValidationError> {
    if name.trim().is_empty() {
        return Err(OrganizationValidationError::EmptyName);
    }

    if name.len() > MAX_ORGANIZATION_NAME_LENGTH {
        return Err(OrganizationValidationError::NameTooLong(
            MAX_ORGANIZATION_NAME_LENGTH,
        ));
    }

    Ok(())
}

/// Derive a slug candidate from arbitrary input, e.g. an email local part.
///
/// Lowercases, maps runs of non-slug characters to single hyphens and trims
/// leading/trailing hyphens. Returns "workspace" when nothing usable remains.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_hyphen = true;

    for c in input.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }

    let slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        "workspace".to_string()
    } else {
        slug.chars().take(MAX_SLUG_LENGTH).collect()
    }
}
