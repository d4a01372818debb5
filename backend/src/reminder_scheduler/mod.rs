//! Background task that runs a reminder scan on a fixed interval until the
//! process-wide shutdown signal is raised.

use std::time::Duration;

use subtrack_core::domain::repositories::{
    reminder_dispatcher::ReminderDispatcher, subscriptions::SubscriptionRepository,
};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{shutdown::Shutdown, usecases::reminders::ReminderUseCase};

pub mod worker;

#[derive(Debug, Clone, Copy)]
pub struct ReminderSchedulerConfig {
    pub scan_interval: Duration,
    /// Scan immediately instead of waiting one interval for the first tick.
    pub run_on_startup: bool,
}

pub struct ReminderSchedulerHandle {
    shutdown: Shutdown,
    join_handle: JoinHandle<()>,
}

impl ReminderSchedulerHandle {
    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }

    /// Raises the shutdown signal and waits at most `grace` for the task.
    /// Returns `false` when the task had to be aborted.
    pub async fn shutdown(self, grace: Duration) -> bool {
        self.shutdown.trigger();
        self.join(grace).await
    }

    /// Waits at most `grace` for the task to stop on its own, then aborts it.
    pub async fn join(mut self, grace: Duration) -> bool {
        match tokio::time::timeout(grace, &mut self.join_handle).await {
            Ok(Ok(())) => {
                info!("reminders: scheduler stopped");
                true
            }
            Ok(Err(err)) => {
                error!(error = ?err, "reminders: scheduler task failed");
                false
            }
            Err(_) => {
                warn!(
                    grace_secs = grace.as_secs(),
                    "reminders: scheduler did not stop within grace period, aborting"
                );
                self.join_handle.abort();
                false
            }
        }
    }
}

pub fn spawn<S, D>(
    usecase: ReminderUseCase<S, D>,
    config: ReminderSchedulerConfig,
    shutdown: Shutdown,
) -> ReminderSchedulerHandle
where
    S: SubscriptionRepository + Send + Sync + 'static,
    D: ReminderDispatcher + Send + Sync + 'static,
{
    let join_handle = tokio::spawn(worker::run_reminder_loop(
        usecase,
        config,
        shutdown.subscribe(),
    ));

    ReminderSchedulerHandle {
        shutdown,
        join_handle,
    }
}
