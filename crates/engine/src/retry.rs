//! Optimistic write loop bookkeeping.

use quorum_ports::{Entity, PortsError};
use tracing::{debug, warn};

use crate::config::ConflictRetry;
use crate::error::EngineError;

/// Tracks attempts for one read-compute-swap loop on one record.
///
/// ```text
/// let mut backoff = ConflictBackoff::new(policy, Entity::Instance, id);
/// loop {
///     let current = load().await?;
///     let next = compute(current)?;
///     if swapped(store.compare_and_swap(..).await)? { break }
///     backoff.lost().await?;
/// }
/// ```
#[derive(Debug)]
pub(crate) struct ConflictBackoff {
    policy: ConflictRetry,
    entity: Entity,
    id: u64,
    retries: u32,
}

impl ConflictBackoff {
    pub(crate) fn new(policy: ConflictRetry, entity: Entity, id: u64) -> Self {
        Self {
            policy,
            entity,
            id,
            retries: 0,
        }
    }

    /// Attempts started so far, the current one included.
    pub(crate) fn attempts(&self) -> u32 {
        self.retries + 1
    }

    /// Record a lost race. Sleeps before the next attempt, or fails once the
    /// budget is spent.
    pub(crate) async fn lost(&mut self) -> Result<(), EngineError> {
        let attempts = self.attempts();
        if attempts >= self.policy.attempts() {
            warn!(
                entity = %self.entity,
                id = self.id,
                attempts,
                "optimistic write retry budget exhausted"
            );
            return Err(EngineError::Conflict {
                entity: self.entity,
                id: self.id,
                attempts,
            });
        }

        let delay = self.policy.delay(self.retries);
        debug!(
            entity = %self.entity,
            id = self.id,
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            "compare-and-swap lost, retrying"
        );
        self.retries += 1;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

/// Fold a driver-reported conflict into a plain lost race.
pub(crate) fn swapped(result: Result<bool, PortsError>) -> Result<bool, EngineError> {
    match result {
        Ok(won) => Ok(won),
        Err(PortsError::Conflict { .. }) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instant(max_attempts: u32) -> ConflictRetry {
        ConflictRetry {
            max_attempts,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
        }
    }

    #[tokio::test]
    async fn budget_counts_first_attempt() {
        let mut backoff = ConflictBackoff::new(instant(3), Entity::Instance, 7);
        assert!(backoff.lost().await.is_ok());
        assert!(backoff.lost().await.is_ok());
        assert_eq!(backoff.attempts(), 3);

        let err = backoff.lost().await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Conflict {
                entity: Entity::Instance,
                id: 7,
                attempts: 3,
            }
        ));
    }

    #[tokio::test]
    async fn zero_budget_fails_on_first_loss() {
        let mut backoff = ConflictBackoff::new(instant(0), Entity::Template, 1);
        assert!(backoff.lost().await.is_err());
    }

    #[test]
    fn driver_conflict_is_a_lost_race() {
        assert!(!swapped(Err(PortsError::conflict(Entity::Instance, 1, 1, 2))).unwrap());
        assert!(swapped(Ok(true)).unwrap());
        assert!(swapped(Err(PortsError::Connection("down".into()))).is_err());
    }
}
