//! Notification delivery

use async_trait::async_trait;
use tracing::info;

use crate::domain::invitation::Invitation;
use crate::domain::notification::Notifier;
use crate::domain::DomainError;

/// Notifier that records deliveries in the application log.
///
/// Stands in for an email provider; the invitation record remains the source
/// of truth whether or not delivery happens.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_invited(
        &self,
        invitation: &Invitation,
        organization_name: &str,
    ) -> Result<(), DomainError> {
        info!(
            email = %invitation.email(),
            organization = %organization_name,
            role = %invitation.role(),
            expires_at = %invitation.expires_at(),
            "Invitation notification dispatched"
        );
        Ok(())
    }
}
