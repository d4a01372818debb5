use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::expenses::{ExpenseEntity, InsertExpenseEntity};

#[automock]
#[async_trait]
pub trait ExpenseRepository {
    async fn create(&self, insert_expense_entity: InsertExpenseEntity) -> Result<ExpenseEntity>;
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<ExpenseEntity>>;
}
