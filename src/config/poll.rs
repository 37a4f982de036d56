// ABOUTME: Change-set polling schedule configuration.
// ABOUTME: Doubling intervals from an initial value, bounded by a total wait.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PollConfig {
    /// Delay before the second describe; doubles after each one.
    #[serde(default = "default_initial_interval", with = "humantime_serde")]
    pub initial_interval: Duration,

    /// Total sleep allowed before giving up on a change set.
    #[serde(default = "default_max_wait", with = "humantime_serde")]
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: default_initial_interval(),
            max_wait: default_max_wait(),
        }
    }
}

impl PollConfig {
    /// Reject schedules that could never make progress.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_interval.is_zero() {
            return Err("poll.initial_interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Partial schedule used by destination overrides.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PollOverrides {
    #[serde(default, with = "humantime_serde")]
    pub initial_interval: Option<Duration>,

    #[serde(default, with = "humantime_serde")]
    pub max_wait: Option<Duration>,
}

impl PollOverrides {
    pub fn apply(&self, poll: &mut PollConfig) {
        if let Some(interval) = self.initial_interval {
            poll.initial_interval = interval;
        }
        if let Some(max_wait) = self.max_wait {
            poll.max_wait = max_wait;
        }
    }
}

fn default_initial_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_max_wait() -> Duration {
    Duration::from_secs(30 * 60)
}
