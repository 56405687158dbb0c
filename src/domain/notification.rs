//! Notification collaborator trait
//!
//! Delivery is best-effort: the invitation record is the source of truth and
//! a failed notification never rolls back or fails the originating request.

use async_trait::async_trait;

use crate::domain::invitation::Invitation;
use crate::domain::DomainError;

/// Outbound notification dispatch
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an invitation notice to the invitee
    async fn notify_invited(
        &self,
        invitation: &Invitation,
        organization_name: &str,
    ) -> Result<(), DomainError>;
}
