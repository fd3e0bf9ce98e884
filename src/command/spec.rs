//! Command specifications and their builder

use std::time::Duration;

use crate::command::argument::{ArgSpec, ArgSpecBuilder};
use crate::error::ConfigError;
use crate::types::Capability;

/// Visibility of a command in host-rendered command lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Shown in command lists
    #[default]
    Listed,
    /// Registered and callable, but hidden from command lists
    Unlisted,
}

/// Immutable specification of one command.
///
/// Built once at registration time via [`CommandSpecBuilder`]; the builder
/// performs all fatal configuration validation.
#[derive(Debug)]
pub struct CommandSpec {
    /// Canonical name first, aliases after; unique across the registry
    names: Vec<String>,
    description: String,
    verbose_description: String,
    visibility: Visibility,
    user_cooldown: Duration,
    guild_cooldown: Duration,
    args: Vec<ArgSpec>,
    guild_only: bool,
    raw_args: bool,
    raw_args_name: String,
    raw_args_description: String,
    execute_if_store_unreachable: bool,
    capabilities: Vec<Capability>,
    signature: String,
}

impl CommandSpec {
    /// Start building a command spec with the given canonical name
    pub fn builder(name: impl Into<String>) -> CommandSpecBuilder {
        CommandSpecBuilder::new(name)
    }

    /// Canonical name (the first entry of the name/alias list)
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// Canonical name plus aliases, in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn verbose_description(&self) -> &str {
        &self.verbose_description
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn user_cooldown(&self) -> Duration {
        self.user_cooldown
    }

    pub fn guild_cooldown(&self) -> Duration {
        self.guild_cooldown
    }

    pub fn has_user_cooldown(&self) -> bool {
        !self.user_cooldown.is_zero()
    }

    pub fn has_guild_cooldown(&self) -> bool {
        !self.guild_cooldown.is_zero()
    }

    pub fn has_any_cooldown(&self) -> bool {
        self.has_user_cooldown() || self.has_guild_cooldown()
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn is_guild_only(&self) -> bool {
        self.guild_only
    }

    /// Raw-args mode hands the whole post-name string to the command body
    /// without running the argument resolver
    pub fn is_raw_args(&self) -> bool {
        self.raw_args
    }

    pub fn raw_args_name(&self) -> &str {
        &self.raw_args_name
    }

    pub fn raw_args_description(&self) -> &str {
        &self.raw_args_description
    }

    /// Whether dispatch proceeds when the cooldown store cannot be read
    /// or written
    pub fn execute_if_store_unreachable(&self) -> bool {
        self.execute_if_store_unreachable
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Display signature, e.g. `roll <sides> [count]`
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Builder for [`CommandSpec`].
///
/// Defaults: no description, listed, no cooldowns, no arguments, no
/// required capabilities, usable outside guilds, aborts when the cooldown
/// store is unreachable.
pub struct CommandSpecBuilder {
    names: Vec<String>,
    description: String,
    verbose_description: String,
    visibility: Visibility,
    user_cooldown: Duration,
    guild_cooldown: Duration,
    args: Vec<ArgSpecBuilder>,
    guild_only: bool,
    raw_args: bool,
    raw_args_name: String,
    raw_args_description: String,
    execute_if_store_unreachable: bool,
    capabilities: Vec<Capability>,
}

impl CommandSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            description: String::new(),
            verbose_description: String::new(),
            visibility: Visibility::Listed,
            user_cooldown: Duration::ZERO,
            guild_cooldown: Duration::ZERO,
            args: Vec::new(),
            guild_only: false,
            raw_args: false,
            raw_args_name: String::new(),
            raw_args_description: String::new(),
            execute_if_store_unreachable: false,
            capabilities: Vec::new(),
        }
    }

    /// Add an alias that works like an additional name.
    ///
    /// When a message matches several names or aliases, the longest one
    /// wins. Overlapping aliases are best avoided on commands that take
    /// arguments: with aliases `pour` and `pour water`, the message
    /// `pour water` matches the longer alias and the word `water` is no
    /// longer available as an argument.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.names.push(alias.into());
        self
    }

    /// Add several aliases at once
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Short description shown in command lists
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Longer description shown in command inspection
    pub fn verbose_description(mut self, desc: impl Into<String>) -> Self {
        self.verbose_description = desc.into();
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The same user must wait this long between invocations; zero
    /// disables the cooldown
    pub fn user_cooldown(mut self, cooldown: Duration) -> Self {
        self.user_cooldown = cooldown;
        self
    }

    /// The same guild must wait this long between invocations; requires
    /// [`guild_only`](Self::guild_only)
    pub fn guild_cooldown(mut self, cooldown: Duration) -> Self {
        self.guild_cooldown = cooldown;
        self
    }

    /// Append an argument; arguments are resolved in declaration order
    pub fn argument(mut self, arg: ArgSpecBuilder) -> Self {
        self.args.push(arg);
        self
    }

    /// Restrict the command to guild channels
    pub fn guild_only(mut self, guild_only: bool) -> Self {
        self.guild_only = guild_only;
        self
    }

    /// Hand the whole post-name string to the body instead of resolving
    /// arguments; `name` and `description` describe it in the signature
    /// and inspection output
    pub fn raw_args(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.raw_args = true;
        self.raw_args_name = name.into();
        self.raw_args_description = description.into();
        self
    }

    /// Allow execution when the cooldown store cannot be checked or
    /// updated. Commands without any cooldown execute regardless.
    pub fn execute_if_store_unreachable(mut self, execute: bool) -> Self {
        self.execute_if_store_unreachable = execute;
        self
    }

    /// Require a capability the sender must hold
    pub fn capability(mut self, capability: impl Into<Capability>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Validate and produce the immutable spec
    pub fn build(self) -> Result<CommandSpec, ConfigError> {
        if self.names.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::EmptyName);
        }
        let name = self.names[0].clone();

        if !self.guild_cooldown.is_zero() && !self.guild_only {
            return Err(ConfigError::GuildCooldownWithoutGuildOnly { command: name });
        }

        let mut args = Vec::with_capacity(self.args.len());
        for builder in self.args {
            args.push(builder.build()?);
        }

        let mut seen_optional = false;
        for arg in &args {
            if args.iter().filter(|other| other.id() == arg.id()).count() > 1 {
                return Err(ConfigError::DuplicateArgId {
                    command: name,
                    arg: arg.id().0,
                });
            }
            if seen_optional && !arg.is_optional() {
                return Err(ConfigError::RequiredAfterOptional {
                    command: name,
                    arg: arg.id().0,
                });
            }
            seen_optional |= arg.is_optional();
        }

        let signature = generate_signature(&self.names[0], self.raw_args, &self.raw_args_name, &args);

        Ok(CommandSpec {
            names: self.names,
            description: self.description,
            verbose_description: self.verbose_description,
            visibility: self.visibility,
            user_cooldown: self.user_cooldown,
            guild_cooldown: self.guild_cooldown,
            args,
            guild_only: self.guild_only,
            raw_args: self.raw_args,
            raw_args_name: self.raw_args_name,
            raw_args_description: self.raw_args_description,
            execute_if_store_unreachable: self.execute_if_store_unreachable,
            capabilities: self.capabilities,
            signature,
        })
    }
}

/// Required arguments render as `<name(opt1|opt2)>`, optional ones as
/// `[name(opt1|opt2)]`; raw-args commands render their raw-args name bare.
fn generate_signature(name: &str, raw_args: bool, raw_args_name: &str, args: &[ArgSpec]) -> String {
    let mut signature = name.to_string();
    if raw_args {
        signature.push(' ');
        signature.push_str(raw_args_name);
        return signature;
    }
    for arg in args {
        signature.push(' ');
        let (open, close) = if arg.is_optional() { ('[', ']') } else { ('<', '>') };
        signature.push(open);
        signature.push_str(&arg.name().to_lowercase());
        if !arg.options().is_empty() {
            signature.push('(');
            signature.push_str(&arg.options().join("|"));
            signature.push(')');
        }
        signature.push(close);
    }
    signature
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::argument::ArgSpec;

    #[test]
    fn minimal_spec_builds() {
        let spec = CommandSpec::builder("ping").build().unwrap();
        assert_eq!(spec.name(), "ping");
        assert_eq!(spec.signature(), "ping");
        assert!(!spec.has_any_cooldown());
        assert_eq!(spec.visibility(), Visibility::Listed);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            CommandSpec::builder("").build().unwrap_err(),
            ConfigError::EmptyName
        );
        assert_eq!(
            CommandSpec::builder("ping").alias("").build().unwrap_err(),
            ConfigError::EmptyName
        );
    }

    #[test]
    fn guild_cooldown_requires_guild_only() {
        let err = CommandSpec::builder("raid")
            .guild_cooldown(Duration::from_secs(60))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::GuildCooldownWithoutGuildOnly {
                command: "raid".into()
            }
        );

        assert!(CommandSpec::builder("raid")
            .guild_cooldown(Duration::from_secs(60))
            .guild_only(true)
            .build()
            .is_ok());
    }

    #[test]
    fn required_after_optional_is_rejected() {
        let err = CommandSpec::builder("greet")
            .argument(ArgSpec::builder(0, "target"))
            .argument(ArgSpec::builder(1, "greeting").optional(true))
            .argument(ArgSpec::builder(2, "punctuation"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::RequiredAfterOptional {
                command: "greet".into(),
                arg: 2
            }
        );
    }

    #[test]
    fn duplicate_argument_ids_are_rejected() {
        let err = CommandSpec::builder("greet")
            .argument(ArgSpec::builder(0, "target"))
            .argument(ArgSpec::builder(0, "greeting"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateArgId {
                command: "greet".into(),
                arg: 0
            }
        );
    }

    #[test]
    fn signature_lists_arguments() {
        let spec = CommandSpec::builder("roll")
            .argument(ArgSpec::builder(0, "Sides").options(["6", "20"]))
            .argument(ArgSpec::builder(1, "Count").optional(true))
            .build()
            .unwrap();
        assert_eq!(spec.signature(), "roll <sides(6|20)> [count]");
    }

    #[test]
    fn raw_args_signature_uses_raw_name() {
        let spec = CommandSpec::builder("echo")
            .raw_args("text", "the text to echo back")
            .build()
            .unwrap();
        assert_eq!(spec.signature(), "echo text");
        assert!(spec.is_raw_args());
    }
}
