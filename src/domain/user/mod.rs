//! User domain - profiles and authenticated identities

mod entity;
mod repository;
mod validation;

pub use entity::{Identity, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_display_name, validate_email, validate_user_id, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
