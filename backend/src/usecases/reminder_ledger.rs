use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Remembers which `(subscription, next_billing_at)` pairs have already been
/// reminded in this process.
#[derive(Debug, Default)]
pub struct ReminderLedger {
    reminded: HashMap<Uuid, DateTime<Utc>>,
}

impl ReminderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_reminded(&self, subscription_id: Uuid, next_billing_at: DateTime<Utc>) -> bool {
        self.reminded.get(&subscription_id) == Some(&next_billing_at)
    }

    pub fn record(&mut self, subscription_id: Uuid, next_billing_at: DateTime<Utc>) {
        self.reminded.insert(subscription_id, next_billing_at);
    }

    /// Drops entries for subscriptions that are no longer due.
    pub fn retain_only(&mut self, due_ids: &HashSet<Uuid>) {
        self.reminded.retain(|id, _| due_ids.contains(id));
    }

    pub fn len(&self) -> usize {
        self.reminded.len()
    }
}
