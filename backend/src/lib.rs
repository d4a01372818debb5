pub mod axum_http;
pub mod config;
pub mod reminder_scheduler;
pub mod shutdown;
pub mod usecases;
