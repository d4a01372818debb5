use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    repositories::reminder_dispatcher::ReminderDispatcher,
};

/// Default reminder action: one structured log line per due subscription.
#[derive(Debug, Default, Clone)]
pub struct LogReminderDispatcher;

#[async_trait]
impl ReminderDispatcher for LogReminderDispatcher {
    async fn dispatch(&self, subscription: &SubscriptionEntity) -> Result<()> {
        info!(
            subscription_id = %subscription.id,
            user_id = %subscription.user_id,
            title = %subscription.title,
            amount = subscription.amount,
            currency = %subscription.currency,
            billing_period = %subscription.billing_period,
            next_billing_at = %subscription.next_billing_at.to_rfc3339(),
            "reminders: subscription billing is due soon"
        );
        Ok(())
    }
}
