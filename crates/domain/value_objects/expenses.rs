use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::expenses::{ExpenseEntity, InsertExpenseEntity},
    value_objects::validation::{ValidationError, parse_user_id, positive_amount, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<ExpenseEntity> for ExpenseModel {
    fn from(value: ExpenseEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            title: value.title,
            amount: value.amount,
            currency: value.currency,
            category: value.category,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateExpenseRequest {
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
}

impl CreateExpenseRequest {
    pub fn into_insert_entity(self) -> Result<InsertExpenseEntity, ValidationError> {
        Ok(InsertExpenseEntity {
            user_id: parse_user_id(&self.user_id)?,
            title: required("title", &self.title)?,
            amount: positive_amount(self.amount)?,
            currency: required("currency", &self.currency)?,
            category: required("category", &self.category)?,
        })
    }
}
