use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::{PgPoolSquad, with_connection},
        schema::expenses,
    },
};
use domain::{
    entities::expenses::{ExpenseEntity, InsertExpenseEntity},
    repositories::expenses::ExpenseRepository,
};

pub struct ExpensePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ExpensePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ExpenseRepository for ExpensePostgres {
    async fn create(&self, insert_expense_entity: InsertExpenseEntity) -> Result<ExpenseEntity> {
        with_connection(&self.db_pool, move |conn| {
            let result = insert_into(expenses::table)
                .values(&insert_expense_entity)
                .returning(ExpenseEntity::as_returning())
                .get_result::<ExpenseEntity>(conn)?;

            Ok(result)
        })
        .await
    }

    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<ExpenseEntity>> {
        with_connection(&self.db_pool, move |conn| {
            let results = expenses::table
                .filter(expenses::user_id.eq(user_id))
                .order(expenses::created_at.desc())
                .select(ExpenseEntity::as_select())
                .load::<ExpenseEntity>(conn)?;

            Ok(results)
        })
        .await
    }
}
