//! Command specifications, bodies and the registry
//!
//! Specs are built once at registration time through their builders, which
//! perform all fatal configuration validation, and are immutable afterwards.

mod argument;
mod body;
mod registry;
mod spec;

pub use argument::{ArgId, ArgSpec, ArgSpecBuilder, NumberCheck, StringCheck, TokenMode};
pub use body::{CommandBody, CommandError};
pub use registry::{CommandEntry, CommandRegistry};
pub use spec::{CommandSpec, CommandSpecBuilder, Visibility};
