// ABOUTME: Completion polling with doubling backoff.
// ABOUTME: Reads are retried until a terminal status or the wait budget runs out.

use std::time::Duration;

use crate::config::PollConfig;
use crate::platform::{ChangeSetDescription, StackPlatform};
use crate::types::ChangeSetId;

use super::error::{DeployError, Stage};

/// Poll intervals starting at an initial value and doubling each step.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
}

impl Backoff {
    pub fn new(initial: Duration) -> Self {
        Self { next: initial }
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = current.saturating_mul(2);
        Some(current)
    }
}

/// Describe `id` until its status is terminal.
///
/// Sleeps between describes follow [`Backoff`]. Before each sleep the
/// cumulative wait is checked against `poll.max_wait`; if the next sleep
/// would exceed it, polling stops with [`DeployError::Timeout`].
pub async fn await_terminal<P: StackPlatform + ?Sized>(
    platform: &P,
    id: &ChangeSetId,
    poll: &PollConfig,
    stage: Stage,
) -> Result<ChangeSetDescription, DeployError> {
    let mut intervals = Backoff::new(poll.initial_interval);
    let mut waited = Duration::ZERO;

    loop {
        let description = platform
            .describe_change_set(id)
            .await
            .map_err(DeployError::platform(stage))?;

        if description.status.is_terminal() {
            tracing::debug!(
                "Change set {} reached {} after {:?}",
                id,
                description.status,
                waited
            );
            return Ok(description);
        }

        let interval = intervals.next().unwrap_or(poll.initial_interval);
        if exceeds_budget(waited, interval, poll.max_wait) {
            return Err(DeployError::Timeout {
                change_set: id.to_string(),
                stage,
                waited,
            });
        }

        tracing::debug!(
            "Change set {} is {}, polling again in {:?}",
            id,
            description.status,
            interval
        );
        tokio::time::sleep(interval).await;
        waited = waited.saturating_add(interval);
    }
}

/// Whether sleeping `interval` more would take the total past `max_wait`.
fn exceeds_budget(waited: Duration, interval: Duration, max_wait: Duration) -> bool {
    waited.saturating_add(interval) > max_wait
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn backoff_doubles_from_initial_interval() {
        let intervals: Vec<_> = Backoff::new(Duration::from_secs(2)).take(5).collect();
        assert_eq!(
            intervals,
            [2, 4, 8, 16, 32].map(Duration::from_secs).to_vec()
        );
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        let last = Backoff::new(Duration::MAX / 2).nth(3).unwrap();
        assert_eq!(last, Duration::MAX);
    }

    #[test]
    fn budget_check_does_not_overflow() {
        assert!(!exceeds_budget(Duration::MAX / 2, Duration::MAX, Duration::MAX));
        assert!(exceeds_budget(Duration::MAX, Duration::MAX, Duration::from_secs(1800)));
        assert!(exceeds_budget(Duration::from_secs(14), Duration::from_secs(16), Duration::from_secs(20)));
        assert!(!exceeds_budget(Duration::from_secs(14), Duration::from_secs(16), Duration::from_secs(30)));
    }

    proptest! {
        #[test]
        fn each_interval_is_twice_the_previous(initial_ms in 1u64..10_000, steps in 2usize..20) {
            let intervals: Vec<_> = Backoff::new(Duration::from_millis(initial_ms))
                .take(steps)
                .collect();
            prop_assert_eq!(intervals[0], Duration::from_millis(initial_ms));
            for pair in intervals.windows(2) {
                prop_assert_eq!(pair[1], pair[0] * 2);
            }
        }
    }
}
