use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[automock]
#[async_trait]
pub trait SubscriptionRepository {
    async fn create(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    /// Newest first.
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    /// Active subscriptions with `next_billing_at <= now + window`, soonest first.
    async fn get_upcoming(&self, window: Duration) -> Result<Vec<SubscriptionEntity>>;
}
