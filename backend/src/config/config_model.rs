use std::time::Duration;

use subtrack_core::domain::value_objects::enums::reminder_dedup_policies::ReminderDedupPolicy;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub reminder: Reminder,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// MiB
    pub body_limit: u64,
    /// Seconds
    pub timeout: u64,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Reminder {
    pub scan_interval: Duration,
    pub lookahead: Duration,
    pub run_on_startup: bool,
    pub dedup_policy: ReminderDedupPolicy,
    pub shutdown_grace: Duration,
}
