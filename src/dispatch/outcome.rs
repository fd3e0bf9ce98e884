//! Terminal states of one dispatch

use std::time::Duration;

use crate::cooldown::CooldownAxis;

/// How a dispatch ended.
///
/// Every incoming message reaches exactly one of these states; none of
/// them propagates out of the worker that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Bot-authored, no prefix, or nothing after the prefix
    NotCommand,
    /// No registered name or alias matched; silently ignored
    NoMatch,
    /// Guild-only command invoked outside a guild
    GuildOnly,
    /// Cooldown store down and the command does not run without it
    StoreUnavailable,
    /// One or more arguments failed validation
    InvalidArgs,
    /// The sender lacks required capabilities
    MissingCapabilities,
    /// A cooldown on the given axis is still active
    OnCooldown(CooldownAxis, Duration),
    /// The store failed during precheck or commit and the command does
    /// not run without it
    StoreError,
    /// The command body ran to completion
    Executed,
    /// The command body returned an error or panicked
    ExecutionFailed,
}
