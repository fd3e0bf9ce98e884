//! In-memory cooldown store
//!
//! Reference implementation of [`CooldownStore`], useful for tests and
//! for hosts that don't need cooldowns to survive a restart. The
//! reachability toggle simulates (or administratively forces) an outage.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cooldown::store::{CooldownAxis, CooldownStore, StoreError};

/// Concurrent map-backed cooldown store
#[derive(Default)]
pub struct MemoryCooldownStore {
    entries: DashMap<(CooldownAxis, String, u64), i64>,
    unreachable: AtomicBool,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the simulated reachability of the store
    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(StoreError::Unreachable("memory store marked down".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn expiry(
        &self,
        axis: CooldownAxis,
        command: &str,
        subject: u64,
    ) -> Result<Option<i64>, StoreError> {
        self.check_reachable()?;
        Ok(self
            .entries
            .get(&(axis, command.to_string(), subject))
            .map(|entry| *entry.value()))
    }

    async fn set_expiry(
        &self,
        axis: CooldownAxis,
        command: &str,
        subject: u64,
        expires_at_ms: i64,
    ) -> Result<(), StoreError> {
        self.check_reachable()?;
        self.entries
            .insert((axis, command.to_string(), subject), expires_at_ms);
        Ok(())
    }

    fn is_reachable(&self) -> bool {
        !self.unreachable.load(Ordering::SeqCst)
    }
}
