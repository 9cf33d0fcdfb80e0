//! Retention configuration.

use std::time::Duration as StdDuration;

use chrono::Duration;

/// Retention window and sweep cadence.
///
/// Both are configuration, not invariants: the environment can override
/// them per deployment. The sweep interval should stay well below the
/// retention period so memory overhead between sweeps remains bounded.
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    /// Maximum age at which an event remains queryable.
    pub retention: Duration,
    /// How often the sweeper scans for expired events.
    pub sweep_interval: StdDuration,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            retention: Duration::hours(1),
            sweep_interval: StdDuration::from_secs(5 * 60),
        }
    }
}

impl RetentionConfig {
    /// Read overrides from `WEBHOOK_RETENTION_SECS` and
    /// `WEBHOOK_SWEEP_INTERVAL_SECS`, falling back to the defaults on
    /// missing or invalid values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let retention = read_secs("WEBHOOK_RETENTION_SECS")
            .map(Duration::seconds)
            .unwrap_or(defaults.retention);
        let sweep_interval = read_secs("WEBHOOK_SWEEP_INTERVAL_SECS")
            .map(|secs| StdDuration::from_secs(secs as u64))
            .unwrap_or(defaults.sweep_interval);

        Self {
            retention,
            sweep_interval,
        }
    }
}

fn read_secs(var: &str) -> Option<i64> {
    let raw = std::env::var(var).ok()?;
    match raw.parse::<i64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            tracing::warn!(var, value = %raw, "ignoring invalid duration override");
            None
        }
    }
}
