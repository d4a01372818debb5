use std::sync::Arc;

use anyhow::Result;
use subtrack_backend::{
    axum_http::http_serve,
    config::config_loader,
    reminder_scheduler::{self, ReminderSchedulerConfig},
    shutdown::{self, Shutdown},
    usecases::reminders::ReminderUseCase,
};
use subtrack_core::infra::{
    db::{postgres::postgres_connection, repositories::subscriptions::SubscriptionPostgres},
    reminders::log_dispatcher::LogReminderDispatcher,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {:?}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    subtrack_core::observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?;
    let postgres_pool = Arc::new(postgres_pool);
    info!("Postgres connection has been established");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown::listen_for_os_signals(shutdown.clone()));

    let reminder_config = dotenvy_env.reminder.clone();
    let reminder_usecase = ReminderUseCase::new(
        Arc::new(SubscriptionPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(LogReminderDispatcher::default()),
        reminder_config.lookahead,
        reminder_config.dedup_policy,
    );
    let scheduler = reminder_scheduler::spawn(
        reminder_usecase,
        ReminderSchedulerConfig {
            scan_interval: reminder_config.scan_interval,
            run_on_startup: reminder_config.run_on_startup,
        },
        shutdown.clone(),
    );
    info!(
        dedup_policy = %reminder_config.dedup_policy,
        "Reminder scheduler has been started"
    );

    let served = http_serve::start(Arc::new(dotenvy_env), postgres_pool, shutdown.clone()).await;

    if !scheduler.shutdown(reminder_config.shutdown_grace).await {
        warn!("Reminder scheduler was aborted during shutdown");
    }

    served
}
