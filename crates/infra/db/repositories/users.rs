use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::{PgPoolSquad, with_connection},
        schema::users,
    },
};
use domain::{
    entities::users::{InsertUserEntity, UserEntity},
    repositories::users::{EmailAlreadyRegistered, UserRepository},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn create(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        with_connection(&self.db_pool, move |conn| {
            let result = insert_into(users::table)
                .values(&insert_user_entity)
                .returning(UserEntity::as_returning())
                .get_result::<UserEntity>(conn);

            match result {
                Ok(user) => Ok(user),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    Err(EmailAlreadyRegistered.into())
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let email = email.to_string();

        with_connection(&self.db_pool, move |conn| {
            let result = users::table
                .filter(users::email.eq(email))
                .select(UserEntity::as_select())
                .first::<UserEntity>(conn)
                .optional()?;

            Ok(result)
        })
        .await
    }
}
