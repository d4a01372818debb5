use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::{PgPoolSquad, with_connection},
        schema::subscriptions,
    },
};
use domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn create(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        with_connection(&self.db_pool, move |conn| {
            let result = insert_into(subscriptions::table)
                .values(&insert_subscription_entity)
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)?;

            Ok(result)
        })
        .await
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        with_connection(&self.db_pool, move |conn| {
            let results = subscriptions::table
                .filter(subscriptions::user_id.eq(user_id))
                .order(subscriptions::created_at.desc())
                .select(SubscriptionEntity::as_select())
                .load::<SubscriptionEntity>(conn)?;

            Ok(results)
        })
        .await
    }

    async fn get_upcoming(&self, window: Duration) -> Result<Vec<SubscriptionEntity>> {
        let horizon = upcoming_horizon(Utc::now(), window)?;

        with_connection(&self.db_pool, move |conn| {
            let results = subscriptions::table
                .filter(subscriptions::active.eq(true))
                .filter(subscriptions::next_billing_at.le(horizon))
                .order((
                    subscriptions::next_billing_at.asc(),
                    subscriptions::created_at.asc(),
                ))
                .select(SubscriptionEntity::as_select())
                .load::<SubscriptionEntity>(conn)?;

            Ok(results)
        })
        .await
    }
}

fn upcoming_horizon(now: DateTime<Utc>, window: Duration) -> Result<DateTime<Utc>> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|window| now.checked_add_signed(window))
        .with_context(|| format!("lookahead window of {}s is out of range", window.as_secs()))
}
