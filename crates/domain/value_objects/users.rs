use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    value_objects::validation::{ValidationError, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserModel {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub email: String,
}

impl CreateUserRequest {
    pub fn into_insert_entity(self) -> Result<InsertUserEntity, ValidationError> {
        Ok(InsertUserEntity {
            email: required("email", &self.email)?,
        })
    }
}
