//! API request and response types

pub mod error;
pub mod json;
pub mod organization;
pub mod team;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use organization::OrganizationResponse;
pub use team::{
    InvitationResponse, TeamActionRequest, TeamActionResponse, TeamMemberResponse, TeamResponse,
};
