//! Error types for the herald crate
//!
//! Errors are split by concern: [`ConfigError`] for fatal registration-time
//! misconfiguration, [`StoreError`](crate::cooldown::StoreError) for the
//! cooldown persistence collaborator and
//! [`CommandError`](crate::command::CommandError) for command body failures.
//! [`HeraldError`] is the crate-level umbrella. No error here ever
//! terminates the worker pool; every failure is scoped to the registration
//! call or the single dispatch that produced it.

use thiserror::Error;

use crate::command::CommandError;
use crate::cooldown::StoreError;

/// Result type alias for herald operations
pub type HeraldResult<T> = Result<T, HeraldError>;

/// Fatal configuration errors, raised while building command or argument
/// specifications or while registering commands. Registration aborts with
/// no partial registry state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Command name or alias is empty
    #[error("command name and aliases must be non-empty")]
    EmptyName,

    /// The same name or alias is registered twice
    #[error("duplicate command name or alias: {alias}")]
    DuplicateAlias { alias: String },

    /// Two arguments of one command share an id
    #[error("command {command}: duplicate argument id {arg}")]
    DuplicateArgId { command: String, arg: u32 },

    /// A required argument follows an optional one
    #[error("command {command}: required argument {arg} follows an optional argument")]
    RequiredAfterOptional { command: String, arg: u32 },

    /// Guild cooldown configured on a command usable outside guilds
    #[error("command {command}: a guild cooldown requires the guild-only flag")]
    GuildCooldownWithoutGuildOnly { command: String },

    /// Numeric parsing combined with a literal option set
    #[error("argument {arg}: parse-as-number and literal options are mutually exclusive")]
    NumberWithOptions { arg: u32 },

    /// Numeric predicates on an argument that is not parsed as a number
    #[error("argument {arg}: numeric predicates require parse-as-number")]
    NumberChecksWithoutNumber { arg: u32 },

    /// String predicates combined with custom tokenization or numeric parsing
    #[error("argument {arg}: string predicates are incompatible with custom tokenization and parse-as-number")]
    StringChecksWithMode { arg: u32 },

    /// Custom tokenization combined with quoting
    #[error("argument {arg}: custom tokenization and must-be-quoted are mutually exclusive")]
    CustomAndQuoted { arg: u32 },

    /// Quoting or custom tokenization combined with numeric parsing
    #[error("argument {arg}: quoted/custom arguments cannot be parsed as numbers")]
    QuotedOrCustomNumber { arg: u32 },
}

/// Main error type for the herald crate
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Fatal configuration error at registration time
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cooldown persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A command body reported a failure
    #[error(transparent)]
    Command(#[from] CommandError),
}
