use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::users::{InsertUserEntity, UserEntity};

/// Returned (wrapped in `anyhow::Error`) by `create` when the email is taken.
#[derive(Debug, Error)]
#[error("email is already registered")]
pub struct EmailAlreadyRegistered;

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn create(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;
    async fn get_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
}
