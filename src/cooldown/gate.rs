//! The cooldown gate

use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::cooldown::clock::{Clock, SystemClock};
use crate::cooldown::store::{CooldownAxis, CooldownStore, StoreError};

/// Checks and records cooldown expirations against the persistence
/// collaborator.
///
/// The precheck and the later commit of one dispatch are not serialized
/// against other dispatches for the same subject: two concurrent
/// dispatches can both pass precheck before either commits. That race is
/// deliberate; for a rate limiter the occasional double pass under burst
/// load is acceptable and cheaper than per-subject locking in the store.
pub struct CooldownGate {
    store: Arc<dyn CooldownStore>,
    clock: Arc<dyn Clock>,
}

impl CooldownGate {
    pub fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn CooldownStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Whether the underlying store is currently reachable
    pub fn is_reachable(&self) -> bool {
        self.store.is_reachable()
    }

    /// Check whether the subject is still cooling down for the command.
    ///
    /// Returns the remaining duration while the cooldown is active, `None`
    /// once it has expired or was never recorded.
    pub async fn precheck(
        &self,
        command: &str,
        subject: u64,
        axis: CooldownAxis,
    ) -> Result<Option<Duration>, StoreError> {
        let expiry = self.store.expiry(axis, command, subject).await?;
        let now = self.clock.now_ms();
        match expiry {
            Some(expires_at) if now < expires_at => {
                let remaining = Duration::from_millis((expires_at - now) as u64);
                trace!(command, subject, %axis, ?remaining, "cooldown active");
                Ok(Some(remaining))
            }
            _ => Ok(None),
        }
    }

    /// Record that the subject used the command now, starting a cooldown
    /// of the given duration. Replaces any previous record for the key.
    pub async fn commit(
        &self,
        command: &str,
        subject: u64,
        axis: CooldownAxis,
        cooldown: Duration,
    ) -> Result<(), StoreError> {
        let expires_at = self.clock.now_ms() + cooldown.as_millis() as i64;
        trace!(command, subject, %axis, expires_at, "committing cooldown");
        self.store
            .set_expiry(axis, command, subject, expires_at)
            .await
    }
}
