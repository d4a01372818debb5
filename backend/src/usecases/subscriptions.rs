use std::sync::Arc;

use subtrack_core::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::{
        subscriptions::{CreateSubscriptionRequest, SubscriptionModel},
        validation::parse_user_id,
    },
};
use tracing::{error, info, warn};

use super::{UseCaseError, UseCaseResult};

pub struct SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    subscription_repository: Arc<T>,
}

impl<T> SubscriptionUseCase<T>
where
    T: SubscriptionRepository + Send + Sync,
{
    pub fn new(subscription_repository: Arc<T>) -> Self {
        Self {
            subscription_repository,
        }
    }

    pub async fn create(
        &self,
        request: CreateSubscriptionRequest,
    ) -> UseCaseResult<SubscriptionModel> {
        let insert_subscription_entity = request.into_insert_entity().map_err(|err| {
            warn!(error = %err, "subscriptions: rejected create request");
            err
        })?;
        let user_id = insert_subscription_entity.user_id;

        let subscription = self
            .subscription_repository
            .create(insert_subscription_entity)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to create subscription"
                );
                UseCaseError::Internal(err)
            })?;

        info!(
            %user_id,
            subscription_id = %subscription.id,
            next_billing_at = %subscription.next_billing_at,
            "subscriptions: subscription created"
        );
        Ok(SubscriptionModel::from(subscription))
    }

    pub async fn get_by_user(&self, user_id: &str) -> UseCaseResult<Vec<SubscriptionModel>> {
        let user_id = parse_user_id(user_id)?;

        let subscriptions = self
            .subscription_repository
            .get_by_user(user_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to list subscriptions"
                );
                UseCaseError::Internal(err)
            })?;

        Ok(subscriptions
            .into_iter()
            .map(SubscriptionModel::from)
            .collect())
    }
}
