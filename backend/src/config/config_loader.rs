use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use subtrack_core::domain::value_objects::enums::reminder_dedup_policies::ReminderDedupPolicy;

use super::config_model::{BackendServer, Database, DotEnvyConfig, Reminder};

/// Upper bound for reminder durations (ten years). Larger values overflow
/// timer and timestamp arithmetic.
const MAX_REMINDER_SECS: u64 = 10 * 365 * 24 * 60 * 60;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

pub fn from_lookup<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let backend_server = BackendServer {
        port: parse_or(&lookup, "SERVER_PORT", 8080)?,
        body_limit: parse_or(&lookup, "SERVER_BODY_LIMIT", 1)?,
        timeout: parse_or(&lookup, "SERVER_TIMEOUT", 30)?,
        allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
    };

    let database = Database {
        url: lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .context("DATABASE_URL is invalid")?,
        max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
    };
    if database.max_connections == 0 {
        bail!("DATABASE_MAX_CONNECTIONS must be greater than zero");
    }

    let dedup_policy = match lookup("REMINDER_DEDUP_POLICY") {
        Some(raw) => ReminderDedupPolicy::from_str(raw.trim()).ok_or_else(|| {
            anyhow!("REMINDER_DEDUP_POLICY is invalid: expected every_scan or once_per_due_date")
        })?,
        None => ReminderDedupPolicy::default(),
    };

    let reminder = Reminder {
        scan_interval: positive_secs(&lookup, "REMINDER_SCAN_INTERVAL_SECS", 60 * 60)?,
        lookahead: positive_secs(&lookup, "REMINDER_LOOKAHEAD_SECS", 24 * 60 * 60)?,
        run_on_startup: parse_or(&lookup, "REMINDER_RUN_ON_STARTUP", false)?,
        dedup_policy,
        shutdown_grace: Duration::from_secs(parse_or(&lookup, "SHUTDOWN_GRACE_SECS", 10)?),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        reminder,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} is invalid")),
        None => Ok(default),
    }
}

fn positive_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(lookup, key, default)?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    if secs > MAX_REMINDER_SECS {
        bail!("{key} must be at most {MAX_REMINDER_SECS} seconds");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost:5432/subtrack")])).unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.backend_server.body_limit, 1);
        assert_eq!(config.backend_server.timeout, 30);
        assert!(config.backend_server.allowed_origins.is_empty());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.reminder.scan_interval, Duration::from_secs(3600));
        assert_eq!(config.reminder.lookahead, Duration::from_secs(86400));
        assert!(!config.reminder.run_on_startup);
        assert_eq!(
            config.reminder.dedup_policy,
            ReminderDedupPolicy::OncePerDueDate
        );
        assert_eq!(config.reminder.shutdown_grace, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/subtrack"),
            ("SERVER_PORT", "9000"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://app.example.com"),
            ("REMINDER_SCAN_INTERVAL_SECS", "900"),
            ("REMINDER_LOOKAHEAD_SECS", "172800"),
            ("REMINDER_RUN_ON_STARTUP", "true"),
            ("REMINDER_DEDUP_POLICY", "every_scan"),
        ]))
        .unwrap();

        assert_eq!(config.backend_server.port, 9000);
        assert_eq!(
            config.backend_server.allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert_eq!(config.reminder.scan_interval, Duration::from_secs(900));
        assert_eq!(config.reminder.lookahead, Duration::from_secs(172800));
        assert!(config.reminder.run_on_startup);
        assert_eq!(config.reminder.dedup_policy, ReminderDedupPolicy::EveryScan);
    }

    #[test]
    fn missing_database_url_fails() {
        let err = from_lookup(lookup(&[])).unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"), "got: {err}");
    }

    #[test]
    fn invalid_values_fail_fast() {
        for (key, value) in [
            ("SERVER_PORT", "eighty"),
            ("REMINDER_SCAN_INTERVAL_SECS", "0"),
            ("REMINDER_LOOKAHEAD_SECS", "-5"),
            ("REMINDER_RUN_ON_STARTUP", "yes"),
            ("REMINDER_DEDUP_POLICY", "never"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ] {
            let result = from_lookup(lookup(&[("DATABASE_URL", "postgres://db/x"), (key, value)]));
            let err = result.unwrap_err().to_string();
            assert!(err.contains(key), "expected error for {key}, got: {err}");
        }
    }

    #[test]
    fn reminder_durations_too_large_for_timers_are_rejected() {
        let max = u64::MAX.to_string();
        for (key, value) in [
            ("REMINDER_SCAN_INTERVAL_SECS", max.as_str()),
            ("REMINDER_LOOKAHEAD_SECS", "10000000000000"),
        ] {
            let result = from_lookup(lookup(&[("DATABASE_URL", "postgres://db/x"), (key, value)]));
            let err = result.unwrap_err().to_string();
            assert!(err.contains(key), "expected error for {key}, got: {err}");
        }
    }

    #[test]
    fn largest_accepted_durations_still_fit_timers() {
        let max = MAX_REMINDER_SECS.to_string();
        let config = from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/x"),
            ("REMINDER_SCAN_INTERVAL_SECS", max.as_str()),
            ("REMINDER_LOOKAHEAD_SECS", max.as_str()),
        ]))
        .unwrap();

        assert!(
            tokio::time::Instant::now()
                .checked_add(config.reminder.scan_interval)
                .is_some()
        );
        let lookahead = chrono::Duration::from_std(config.reminder.lookahead).unwrap();
        assert!(chrono::Utc::now().checked_add_signed(lookahead).is_some());
    }
}
