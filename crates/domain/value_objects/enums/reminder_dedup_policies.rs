use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How the reminder scan treats a subscription that is still inside the
/// lookahead window on a later scan.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderDedupPolicy {
    /// Remind on every scan while the subscription stays due.
    EveryScan,
    /// Remind once per `(subscription, next_billing_at)` pair for the life of the process.
    #[default]
    OncePerDueDate,
}

impl ReminderDedupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderDedupPolicy::EveryScan => "every_scan",
            ReminderDedupPolicy::OncePerDueDate => "once_per_due_date",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "every_scan" => Some(ReminderDedupPolicy::EveryScan),
            "once_per_due_date" => Some(ReminderDedupPolicy::OncePerDueDate),
            _ => None,
        }
    }
}

impl Display for ReminderDedupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
