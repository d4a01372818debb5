use std::sync::Arc;

use subtrack_core::domain::{
    repositories::expenses::ExpenseRepository,
    value_objects::{
        expenses::{CreateExpenseRequest, ExpenseModel},
        validation::parse_user_id,
    },
};
use tracing::{error, info, warn};

use super::{UseCaseError, UseCaseResult};

pub struct ExpenseUseCase<T>
where
    T: ExpenseRepository + Send + Sync,
{
    expense_repository: Arc<T>,
}

impl<T> ExpenseUseCase<T>
where
    T: ExpenseRepository + Send + Sync,
{
    pub fn new(expense_repository: Arc<T>) -> Self {
        Self { expense_repository }
    }

    pub async fn create(&self, request: CreateExpenseRequest) -> UseCaseResult<ExpenseModel> {
        let insert_expense_entity = request.into_insert_entity().map_err(|err| {
            warn!(error = %err, "expenses: rejected create request");
            err
        })?;
        let user_id = insert_expense_entity.user_id;

        let expense = self
            .expense_repository
            .create(insert_expense_entity)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "expenses: failed to create expense");
                UseCaseError::Internal(err)
            })?;

        info!(%user_id, expense_id = %expense.id, "expenses: expense created");
        Ok(ExpenseModel::from(expense))
    }

    pub async fn get_by_user(&self, user_id: &str) -> UseCaseResult<Vec<ExpenseModel>> {
        let user_id = parse_user_id(user_id)?;

        let expenses = self
            .expense_repository
            .get_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "expenses: failed to list expenses");
                UseCaseError::Internal(err)
            })?;

        Ok(expenses.into_iter().map(ExpenseModel::from).collect())
    }
}
