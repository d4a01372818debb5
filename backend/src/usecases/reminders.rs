use std::{collections::HashSet, sync::Arc, time::Duration};

use anyhow::Result;
use subtrack_core::domain::{
    repositories::{
        reminder_dispatcher::ReminderDispatcher, subscriptions::SubscriptionRepository,
    },
    value_objects::enums::reminder_dedup_policies::ReminderDedupPolicy,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::reminder_ledger::ReminderLedger;

/// Outcome of one scan cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub found: usize,
    pub dispatched: usize,
    pub failed: usize,
    pub skipped_duplicates: usize,
    pub cancelled: bool,
}

pub struct ReminderUseCase<S, D>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    D: ReminderDispatcher + Send + Sync + 'static,
{
    subscription_repository: Arc<S>,
    reminder_dispatcher: Arc<D>,
    lookahead: Duration,
    ledger: Option<ReminderLedger>,
}

impl<S, D> ReminderUseCase<S, D>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    D: ReminderDispatcher + Send + Sync + 'static,
{
    pub fn new(
        subscription_repository: Arc<S>,
        reminder_dispatcher: Arc<D>,
        lookahead: Duration,
        dedup_policy: ReminderDedupPolicy,
    ) -> Self {
        let ledger = match dedup_policy {
            ReminderDedupPolicy::EveryScan => None,
            ReminderDedupPolicy::OncePerDueDate => Some(ReminderLedger::new()),
        };

        Self {
            subscription_repository,
            reminder_dispatcher,
            lookahead,
            ledger,
        }
    }

    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    /// Loads every subscription due within the lookahead window and dispatches
    /// one reminder for each, soonest first.
    ///
    /// A failing dispatch is logged and the scan moves on. A store error ends
    /// the cycle with `Err`. Once `shutdown` reads `true` no further dispatch
    /// starts and the report comes back with `cancelled` set.
    pub async fn run_scan_cycle(&mut self, shutdown: &watch::Receiver<bool>) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        if is_stopped(shutdown) {
            report.cancelled = true;
            return Ok(report);
        }

        let lookahead_secs = self.lookahead.as_secs();
        let subscriptions = self
            .subscription_repository
            .get_upcoming(self.lookahead)
            .await
            .map_err(|err| {
                error!(
                    lookahead_secs,
                    db_error = ?err,
                    "reminders: failed to load upcoming subscriptions"
                );
                err
            })?;

        report.found = subscriptions.len();
        debug!(
            found = report.found,
            lookahead_secs,
            "reminders: upcoming subscriptions loaded"
        );

        if let Some(ledger) = self.ledger.as_mut() {
            let due_ids: HashSet<_> = subscriptions.iter().map(|s| s.id).collect();
            ledger.retain_only(&due_ids);
        }

        for (index, subscription) in subscriptions.iter().enumerate() {
            if is_stopped(shutdown) {
                info!(
                    remaining = report.found - index,
                    "reminders: shutdown requested, stopping scan"
                );
                report.cancelled = true;
                break;
            }

            if let Some(ledger) = self.ledger.as_ref() {
                if ledger.already_reminded(subscription.id, subscription.next_billing_at) {
                    report.skipped_duplicates += 1;
                    continue;
                }
            }

            match self.reminder_dispatcher.dispatch(subscription).await {
                Ok(()) => {
                    report.dispatched += 1;
                    if let Some(ledger) = self.ledger.as_mut() {
                        ledger.record(subscription.id, subscription.next_billing_at);
                    }
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        subscription_id = %subscription.id,
                        user_id = %subscription.user_id,
                        error = ?err,
                        "reminders: failed to dispatch reminder"
                    );
                }
            }
        }

        if let Some(ledger) = self.ledger.as_ref() {
            debug!(ledger_size = ledger.len(), "reminders: dedup ledger updated");
        }

        Ok(report)
    }
}

fn is_stopped(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}
