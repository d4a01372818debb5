use subtrack_core::domain::repositories::{
    reminder_dispatcher::ReminderDispatcher, subscriptions::SubscriptionRepository,
};
use tokio::{
    sync::watch,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{error, info};

use super::ReminderSchedulerConfig;
use crate::{shutdown::stopped, usecases::reminders::ReminderUseCase};

pub async fn run_reminder_loop<S, D>(
    mut usecase: ReminderUseCase<S, D>,
    config: ReminderSchedulerConfig,
    mut shutdown: watch::Receiver<bool>,
) where
    S: SubscriptionRepository + Send + Sync + 'static,
    D: ReminderDispatcher + Send + Sync + 'static,
{
    let first_tick = if config.run_on_startup {
        Some(Instant::now())
    } else {
        Instant::now().checked_add(config.scan_interval)
    };
    let Some(first_tick) = first_tick else {
        error!(
            scan_interval_secs = config.scan_interval.as_secs(),
            "reminders: scan interval is out of range, scheduler not started"
        );
        return;
    };
    let mut ticker = interval_at(first_tick, config.scan_interval);
    // A scan that outlasts the interval swallows the ticks it covered.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        scan_interval_secs = config.scan_interval.as_secs(),
        lookahead_secs = usecase.lookahead().as_secs(),
        run_on_startup = config.run_on_startup,
        "reminders: scheduler started"
    );

    loop {
        tokio::select! {
            biased;
            _ = stopped(&mut shutdown) => break,
            _ = ticker.tick() => {}
        }

        match usecase.run_scan_cycle(&shutdown).await {
            Ok(report) => info!(
                found = report.found,
                dispatched = report.dispatched,
                failed = report.failed,
                skipped_duplicates = report.skipped_duplicates,
                cancelled = report.cancelled,
                "reminders: scan finished"
            ),
            Err(err) => error!(error = ?err, "reminders: scan aborted, waiting for next tick"),
        }
    }

    info!("reminders: shutdown signal received, scheduler exiting");
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use chrono::Utc;
    use subtrack_core::domain::{
        entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        value_objects::enums::reminder_dedup_policies::ReminderDedupPolicy,
    };
    use uuid::Uuid;

    use super::*;
    use crate::{reminder_scheduler, shutdown::Shutdown};

    #[derive(Default)]
    struct CountingStore {
        scans: AtomicUsize,
        rows: Vec<SubscriptionEntity>,
    }

    #[async_trait]
    impl SubscriptionRepository for CountingStore {
        async fn create(&self, _: InsertSubscriptionEntity) -> Result<SubscriptionEntity> {
            bail!("not used by the scheduler")
        }

        async fn get_by_user(&self, _: Uuid) -> Result<Vec<SubscriptionEntity>> {
            Ok(vec![])
        }

        async fn get_upcoming(&self, _: Duration) -> Result<Vec<SubscriptionEntity>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    /// Sleeps for the next scripted delay on every dispatch.
    #[derive(Default)]
    struct ScriptedDispatcher {
        delays: Mutex<VecDeque<Duration>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        hang: bool,
    }

    #[async_trait]
    impl ReminderDispatcher for ScriptedDispatcher {
        async fn dispatch(&self, _: &SubscriptionEntity) -> Result<()> {
            if self.hang {
                std::future::pending::<()>().await;
            }

            let delay = self
                .delays
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default();
            let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn due_subscription() -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Netflix".to_string(),
            amount: 15.49,
            currency: "USD".to_string(),
            billing_period: "monthly".to_string(),
            next_billing_at: now + chrono::Duration::hours(1),
            active: true,
            created_at: now,
        }
    }

    fn start(
        store: Arc<CountingStore>,
        dispatcher: Arc<ScriptedDispatcher>,
        scan_interval: Duration,
        run_on_startup: bool,
    ) -> (Shutdown, reminder_scheduler::ReminderSchedulerHandle) {
        let usecase = ReminderUseCase::new(
            store,
            dispatcher,
            Duration::from_secs(24 * 60 * 60),
            ReminderDedupPolicy::EveryScan,
        );
        let shutdown = Shutdown::new();
        let handle = reminder_scheduler::spawn(
            usecase,
            ReminderSchedulerConfig {
                scan_interval,
                run_on_startup,
            },
            shutdown.clone(),
        );
        (shutdown, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_first_tick_runs_no_scan() {
        let store = Arc::new(CountingStore::default());
        let (_shutdown, handle) = start(
            Arc::clone(&store),
            Arc::new(ScriptedDispatcher::default()),
            Duration::from_secs(3600),
            false,
        );

        assert!(handle.shutdown(Duration::from_secs(1)).await);
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn first_scan_waits_one_interval() {
        let store = Arc::new(CountingStore::default());
        let (shutdown, handle) = start(
            Arc::clone(&store),
            Arc::new(ScriptedDispatcher::default()),
            Duration::from_secs(60),
            false,
        );

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(131)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 3);

        shutdown.trigger();
        assert!(handle.join(Duration::from_secs(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn run_on_startup_scans_immediately() {
        let store = Arc::new(CountingStore::default());
        let (_shutdown, handle) = start(
            Arc::clone(&store),
            Arc::new(ScriptedDispatcher::default()),
            Duration::from_secs(60),
            true,
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 2);

        assert!(handle.shutdown(Duration::from_secs(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn long_scan_skips_missed_ticks_without_overlap() {
        let store = Arc::new(CountingStore {
            rows: vec![due_subscription()],
            ..Default::default()
        });
        let dispatcher = Arc::new(ScriptedDispatcher {
            delays: Mutex::new(VecDeque::from([Duration::from_secs(350)])),
            ..Default::default()
        });
        let (_shutdown, handle) = start(
            Arc::clone(&store),
            Arc::clone(&dispatcher),
            Duration::from_secs(100),
            false,
        );

        // First scan starts at 100s and holds the loop until 450s, covering
        // the ticks at 200s, 300s and 400s.
        tokio::time::sleep(Duration::from_secs(440)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);

        // One catch-up scan at 450s instead of a burst of three.
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 2);

        // Back on the 100s phase at 500s.
        tokio::time::sleep(Duration::from_secs(50)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 3);
        assert_eq!(dispatcher.max_in_flight.load(Ordering::SeqCst), 1);

        assert!(handle.shutdown(Duration::from_secs(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn store_errors_do_not_stop_the_loop() {
        struct FailingStore {
            scans: AtomicUsize,
        }

        #[async_trait]
        impl SubscriptionRepository for FailingStore {
            async fn create(&self, _: InsertSubscriptionEntity) -> Result<SubscriptionEntity> {
                bail!("not used by the scheduler")
            }

            async fn get_by_user(&self, _: Uuid) -> Result<Vec<SubscriptionEntity>> {
                Ok(vec![])
            }

            async fn get_upcoming(&self, _: Duration) -> Result<Vec<SubscriptionEntity>> {
                self.scans.fetch_add(1, Ordering::SeqCst);
                bail!("connection refused")
            }
        }

        let store = Arc::new(FailingStore {
            scans: AtomicUsize::new(0),
        });
        let usecase = ReminderUseCase::new(
            Arc::clone(&store),
            Arc::new(ScriptedDispatcher::default()),
            Duration::from_secs(3600),
            ReminderDedupPolicy::OncePerDueDate,
        );
        let shutdown = Shutdown::new();
        let handle = reminder_scheduler::spawn(
            usecase,
            ReminderSchedulerConfig {
                scan_interval: Duration::from_secs(10),
                run_on_startup: true,
            },
            shutdown,
        );

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 3);
        assert!(!handle.is_finished());

        assert!(handle.shutdown(Duration::from_secs(1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_interval_exits_without_panicking() {
        let store = Arc::new(CountingStore::default());
        let (_shutdown, handle) = start(
            Arc::clone(&store),
            Arc::new(ScriptedDispatcher::default()),
            Duration::MAX,
            false,
        );

        assert!(handle.join(Duration::from_secs(1)).await);
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_dispatch_is_aborted_after_grace() {
        let store = Arc::new(CountingStore {
            rows: vec![due_subscription()],
            ..Default::default()
        });
        let dispatcher = Arc::new(ScriptedDispatcher {
            hang: true,
            ..Default::default()
        });
        let (_shutdown, handle) = start(
            Arc::clone(&store),
            dispatcher,
            Duration::from_secs(60),
            true,
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);

        assert!(!handle.shutdown(Duration::from_secs(5)).await);
    }
}
