//! User profile entity and authenticated identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    normalize_email, validate_display_name, validate_email, validate_user_id, UserValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// User profile entity.
///
/// Credentials never live here; authentication is the token layer's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: UserId,
    /// Normalized email address
    email: String,
    /// Display name
    name: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user profile; the email is normalized and validated
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = normalize_email(&email.into());
        validate_email(&email)?;
        let name = name.into();
        validate_display_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            email,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), UserValidationError> {
        let name = name.into();
        validate_display_name(&name)?;
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Authenticated identity resolved from a request.
///
/// Business logic never reads ambient session state; the acting identity is
/// passed into every operation explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(user_id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: normalize_email(&email.into()),
            name: name.into(),
        }
    }
}
