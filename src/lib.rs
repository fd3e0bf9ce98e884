//! Herald Command Dispatch Library
//!
//! This crate resolves incoming chat messages into command invocations:
//! command matching, argument resolution, capability checks, cooldown
//! tracking and dispatch orchestration on a bounded worker pool.
//!
//! Transport, message delivery and UI rendering are host concerns; the
//! host feeds [`types::Message`] values into a [`dispatch::Dispatcher`]
//! and supplies the [`dispatch::ChatGateway`] and
//! [`cooldown::CooldownStore`] collaborators.

pub mod command;
pub mod config;
pub mod cooldown;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod resolve;
pub mod types;

// Re-export commonly used types
pub use command::{
    ArgId, ArgSpec, ArgSpecBuilder, CommandBody, CommandError, CommandRegistry, CommandSpec,
    CommandSpecBuilder, TokenMode, Visibility,
};
pub use config::DispatcherConfig;
pub use cooldown::{CooldownAxis, CooldownGate, CooldownStore, MemoryCooldownStore, StoreError};
pub use dispatch::{ChatGateway, DispatchOutcome, Dispatcher};
pub use error::{ConfigError, HeraldError, HeraldResult};
pub use resolve::ResolvedArgs;
pub use types::{Capability, ChannelId, GuildId, Message, UserId};
