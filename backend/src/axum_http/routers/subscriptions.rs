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
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::subscriptions::CreateSubscriptionRequest,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::subscriptions::SubscriptionPostgres,
    },
};

use crate::{axum_http::error_responses::AppError, usecases::subscriptions::SubscriptionUseCase};

#[derive(Debug, Default, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(db_pool);
    let usecase = SubscriptionUseCase::new(Arc::new(subscription_repository));

    Router::new()
        .route(
            "/",
            post(create::<SubscriptionPostgres>).get(get_by_user::<SubscriptionPostgres>),
        )
        .with_state(Arc::new(usecase))
}

pub async fn create<T>(
    State(usecase): State<Arc<SubscriptionUseCase<T>>>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync,
{
    let Json(request) = payload?;
    let subscription = usecase.create(request).await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn get_by_user<T>(
    State(usecase): State<Arc<SubscriptionUseCase<T>>>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    T: SubscriptionRepository + Send + Sync,
{
    let Query(query) = query?;
    let user_id = query.user_id.unwrap_or_default();
    let subscriptions = usecase.get_by_user(&user_id).await?;

    Ok((StatusCode::OK, Json(subscriptions)))
}
