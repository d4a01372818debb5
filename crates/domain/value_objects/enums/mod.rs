pub mod billing_periods;
pub mod reminder_dedup_policies;
