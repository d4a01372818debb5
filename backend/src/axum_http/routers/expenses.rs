use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use subtrack_core::{
    domain::{
        repositories::expenses::ExpenseRepository,
        value_objects::expenses::CreateExpenseRequest,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::expenses::ExpensePostgres,
    },
};

use super::subscriptions::UserIdQuery;
use crate::{axum_http::error_responses::AppError, usecases::expenses::ExpenseUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let expense_repository = ExpensePostgres::new(db_pool);
    let usecase = ExpenseUseCase::new(Arc::new(expense_repository));

    Router::new()
        .route(
            "/",
            post(create::<ExpensePostgres>).get(get_by_user::<ExpensePostgres>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn create<T>(
    State(usecase): State<Arc<ExpenseUseCase<T>>>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: ExpenseRepository + Send + Sync,
{
    let Json(request) = payload?;
    let expense = usecase.create(request).await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn get_by_user<T>(
    State(usecase): State<Arc<ExpenseUseCase<T>>>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: ExpenseRepository + Send + Sync,
{
    let Query(query) = query?;
    let expenses = usecase
        .get_by_user(&query.user_id.unwrap_or_default())
        .await?;

    Ok((StatusCode::OK, Json(expenses)))
}
