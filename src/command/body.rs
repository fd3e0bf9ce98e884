//! The command body trait

use async_trait::async_trait;

use crate::command::argument::ArgId;
use crate::resolve::ResolvedArgs;
use crate::types::Message;

/// Error type for command body failures.
///
/// Bodies are caught at the dispatch boundary: failures are logged with
/// full detail and surfaced to the user as a generic message, never
/// propagated to the worker pool.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Command execution failed
    #[error("execution failed: {0}")]
    Execution(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl CommandError {
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

/// Externally supplied behavior of a command.
///
/// One body instance is shared across dispatches, so bodies must not keep
/// per-dispatch state.
#[async_trait]
pub trait CommandBody: Send + Sync {
    /// Run the command with the resolved arguments.
    ///
    /// Replies and side effects go through whatever collaborators the
    /// body captured at construction time.
    async fn execute(&self, message: &Message, args: &ResolvedArgs) -> Result<(), CommandError>;

    /// Custom tokenization hook for arguments built with
    /// [`custom_tokenization`](crate::command::ArgSpecBuilder::custom_tokenization).
    ///
    /// Called with the remaining argument string; returns how many leading
    /// characters the argument consumes. Zero (negative is not
    /// representable) means nothing was chosen and the argument is marked
    /// invalid.
    fn choose_argument_span(&self, message: &Message, remaining: &str, arg: ArgId) -> usize {
        let _ = (message, remaining, arg);
        0
    }
}
