//! The cooldown persistence collaborator boundary

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Cooldown persistence error types.
///
/// An unreachable store is reported, never silently treated as
/// "not cooled down"; the dispatcher decides the consequence via the
/// per-command execute-if-store-unreachable flag.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store cannot be reached at all
    #[error("cooldown store unreachable: {0}")]
    Unreachable(String),

    /// A read or write failed
    #[error("cooldown store query failed: {0}")]
    Query(String),
}

/// Which subject a cooldown is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownAxis {
    /// Per (command, user)
    User,
    /// Per (command, guild)
    Guild,
}

impl fmt::Display for CooldownAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Guild => f.write_str("guild"),
        }
    }
}

/// External key-value persistence for cooldown expirations.
///
/// Conceptually one table per axis, keyed by `(command, subject)` with a
/// single absolute expiry timestamp in milliseconds since the epoch.
/// Writes replace any existing row for the key. Eviction of stale rows is
/// an external maintenance concern; this crate never deletes records.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Read the stored expiry for a key; `None` when no row exists
    async fn expiry(
        &self,
        axis: CooldownAxis,
        command: &str,
        subject: u64,
    ) -> Result<Option<i64>, StoreError>;

    /// Upsert the expiry for a key (replace semantics)
    async fn set_expiry(
        &self,
        axis: CooldownAxis,
        command: &str,
        subject: u64,
        expires_at_ms: i64,
    ) -> Result<(), StoreError>;

    /// Liveness flag, consulted before dispatch commits to running a
    /// command with a cooldown
    fn is_reachable(&self) -> bool;
}
