use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::SubscriptionEntity;

/// Side effect performed for every subscription found by a reminder scan.
///
/// Implementations may be slow or fail; the scan isolates each call.
#[automock]
#[async_trait]
pub trait ReminderDispatcher {
    async fn dispatch(&self, subscription: &SubscriptionEntity) -> Result<()>;
}
