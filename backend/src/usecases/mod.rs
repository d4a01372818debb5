use subtrack_core::domain::value_objects::validation::ValidationError;
use thiserror::Error;

pub mod expenses;
pub mod reminder_ledger;
pub mod reminders;
pub mod subscriptions;
pub mod users;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
