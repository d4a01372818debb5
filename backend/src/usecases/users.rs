use std::sync::Arc;

use subtrack_core::domain::{
    repositories::users::{EmailAlreadyRegistered, UserRepository},
    value_objects::{
        users::{CreateUserRequest, UserModel},
        validation::ValidationError,
    },
};
use tracing::{error, info, warn};

use super::{UseCaseError, UseCaseResult};

pub struct UserUseCase<T>
where
    T: UserRepository + Send + Sync,
{
    user_repository: Arc<T>,
}

impl<T> UserUseCase<T>
where
    T: UserRepository + Send + Sync,
{
    pub fn new(user_repository: Arc<T>) -> Self {
        Self { user_repository }
    }

    pub async fn create(&self, request: CreateUserRequest) -> UseCaseResult<UserModel> {
        let insert_user_entity = request.into_insert_entity().map_err(|err| {
            warn!(error = %err, "users: rejected create request");
            err
        })?;
        let email = insert_user_entity.email.clone();

        match self.user_repository.create(insert_user_entity).await {
            Ok(user) => {
                info!(user_id = %user.id, "users: user created");
                Ok(UserModel::from(user))
            }
            Err(err) if err.downcast_ref::<EmailAlreadyRegistered>().is_some() => {
                info!(%email, "users: email already registered");
                Err(UseCaseError::Conflict(err.to_string()))
            }
            Err(err) => {
                error!(db_error = ?err, "users: failed to create user");
                Err(UseCaseError::Internal(err))
            }
        }
    }

    pub async fn get_by_email(&self, email: &str) -> UseCaseResult<UserModel> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Missing("email").into());
        }

        let user = self
            .user_repository
            .get_by_email(email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "users: failed to look up user by email");
                UseCaseError::Internal(err)
            })?
            .ok_or_else(|| UseCaseError::NotFound("user not found".to_string()))?;

        Ok(UserModel::from(user))
    }
}
