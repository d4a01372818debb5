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
use serde::Deserialize;
use subtrack_core::{
    domain::{repositories::users::UserRepository, value_objects::users::CreateUserRequest},
    infra::db::{postgres::postgres_connection::PgPoolSquad, repositories::users::UserPostgres},
};

use crate::{axum_http::error_responses::AppError, usecases::users::UserUseCase};

#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(db_pool);
    let usecase = UserUseCase::new(Arc::new(user_repository));

    Router::new()
        .route(
            "/",
            post(create::<UserPostgres>).get(get_by_email::<UserPostgres>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn create<T>(
    State(usecase): State<Arc<UserUseCase<T>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync,
{
    let Json(request) = payload?;
    let user = usecase.create(request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_by_email<T>(
    State(usecase): State<Arc<UserUseCase<T>>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync,
{
    let Query(query) = query?;
    let user = usecase
        .get_by_email(&query.email.unwrap_or_default())
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
