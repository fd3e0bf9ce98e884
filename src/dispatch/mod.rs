//! Dispatch orchestration
//!
//! One incoming message becomes one dispatch task on a bounded worker
//! pool. Within a dispatch every pipeline step runs synchronously on the
//! assigned worker; only the persistence collaborator and the command
//! body itself are awaited. The pipeline order is: prefix strip, command
//! match, guild-only gate, store-liveness gate, argument resolution,
//! capability check, cooldown prechecks, cooldown commits, body
//! execution. Each step short-circuits the rest on failure.

mod gateway;
mod outcome;
mod reply;


pub use gateway::ChatGateway;
pub use outcome::DispatchOutcome;

use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, trace};

use crate::command::{ArgId, CommandRegistry, CommandSpec};
use crate::config::DispatcherConfig;
use crate::cooldown::{Clock, CooldownAxis, CooldownGate, CooldownStore};
use crate::matcher;
use crate::resolve;
use crate::types::{Capability, Message};

/// Resolves incoming messages into command invocations.
///
/// Built once, after all commands are registered; the registry is
/// read-only from then on and shared by all workers. Collaborator
/// handles are explicit constructor arguments, owned by the host.
pub struct Dispatcher {
    prefix: String,
    registry: CommandRegistry,
    gate: CooldownGate,
    gateway: Arc<dyn ChatGateway>,
    workers: Arc<tokio::sync::Semaphore>,
}

impl Dispatcher {
    pub fn new(
        config: DispatcherConfig,
        registry: CommandRegistry,
        store: Arc<dyn CooldownStore>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self::build(config, registry, CooldownGate::new(store), gateway)
    }

    /// Like [`new`](Self::new) with an explicit clock source, mainly for
    /// tests
    pub fn with_clock(
        config: DispatcherConfig,
        registry: CommandRegistry,
        store: Arc<dyn CooldownStore>,
        gateway: Arc<dyn ChatGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::build(
            config,
            registry,
            CooldownGate::with_clock(store, clock),
            gateway,
        )
    }

    fn build(
        config: DispatcherConfig,
        registry: CommandRegistry,
        gate: CooldownGate,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self {
            prefix: config.prefix.clone(),
            registry,
            gate,
            gateway,
            workers: Arc::new(tokio::sync::Semaphore::new(config.worker_count())),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The registry this dispatcher serves; useful for host-side command
    /// list and inspection output
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Queue the message onto the worker pool. The returned handle
    /// resolves to the dispatch outcome; hosts that don't care may drop
    /// it.
    pub fn spawn(self: &Arc<Self>, message: Message) -> tokio::task::JoinHandle<DispatchOutcome> {
        let dispatcher = Arc::clone(self);
        let workers = Arc::clone(&self.workers);
        tokio::spawn(async move {
            let _permit = workers
                .acquire_owned()
                .await
                .unwrap_or_else(|_| unreachable!("worker semaphore is never closed"));
            dispatcher.dispatch(&message).await
        })
    }

    /// Run the full pipeline for one message
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        if message.author_is_bot {
            return DispatchOutcome::NotCommand;
        }
        let Some(body_text) = self.strip_prefix(&message.text) else {
            return DispatchOutcome::NotCommand;
        };
        let body_text = body_text.trim();
        if body_text.is_empty() {
            trace!("nothing after prefix");
            return DispatchOutcome::NotCommand;
        }

        let Some(found) = matcher::find_match(&self.registry, body_text) else {
            trace!(message = body_text, "no command matched");
            return DispatchOutcome::NoMatch;
        };
        let spec = Arc::clone(&found.entry.spec);
        let body = Arc::clone(&found.entry.body);
        let arg_text = &body_text[found.matched.len()..];
        debug!(command = spec.name(), matched = found.matched, "dispatching command");

        if spec.is_guild_only() && message.guild.is_none() {
            debug!(command = spec.name(), "guild-only command outside a guild");
            self.gateway.reply(message, reply::GUILD_ONLY).await;
            return DispatchOutcome::GuildOnly;
        }

        if !self.gate.is_reachable()
            && spec.has_any_cooldown()
            && !spec.execute_if_store_unreachable()
        {
            debug!(command = spec.name(), "cooldown store unreachable, aborting");
            self.gateway.reply(message, reply::STORE_UNAVAILABLE).await;
            return DispatchOutcome::StoreUnavailable;
        }

        let choose =
            |arg: ArgId, remaining: &str| body.choose_argument_span(message, remaining, arg);
        let args = resolve::resolve(&spec, arg_text, &choose);
        if !args.is_valid() {
            debug!(command = spec.name(), invalid = ?args.invalid_ids(), "invalid arguments");
            self.gateway
                .reply(message, &reply::wrong_usage(&spec, &args))
                .await;
            return DispatchOutcome::InvalidArgs;
        }

        let missing: Vec<&Capability> = spec
            .capabilities()
            .iter()
            .filter(|c| !self.gateway.has_capability(message, c))
            .collect();
        if !missing.is_empty() {
            debug!(command = spec.name(), ?missing, "missing capabilities");
            self.gateway
                .reply(message, &reply::missing_capabilities(&missing))
                .await;
            return DispatchOutcome::MissingCapabilities;
        }

        if let Some(outcome) = self.precheck_cooldowns(message, &spec).await {
            return outcome;
        }
        if let Some(outcome) = self.commit_cooldowns(message, &spec).await {
            return outcome;
        }

        debug!(command = spec.name(), author = %message.author, "executing command");
        let execution = std::panic::AssertUnwindSafe(body.execute(message, &args)).catch_unwind();
        match execution.await {
            Ok(Ok(())) => {
                debug!(command = spec.name(), "finished execution");
                DispatchOutcome::Executed
            }
            Ok(Err(err)) => {
                error!(command = spec.name(), %err, "error while executing command");
                self.gateway.reply(message, reply::EXECUTION_FAILED).await;
                DispatchOutcome::ExecutionFailed
            }
            Err(_) => {
                error!(command = spec.name(), "command body panicked");
                self.gateway.reply(message, reply::EXECUTION_FAILED).await;
                DispatchOutcome::ExecutionFailed
            }
        }
    }

    fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        // the message must be strictly longer than the prefix
        match text.strip_prefix(&self.prefix) {
            Some(rest) if !rest.is_empty() => Some(rest),
            _ => None,
        }
    }

    /// Returns the terminal outcome when a precheck stops the dispatch
    async fn precheck_cooldowns(
        &self,
        message: &Message,
        spec: &CommandSpec,
    ) -> Option<DispatchOutcome> {
        if spec.has_user_cooldown() {
            let checked = self
                .gate
                .precheck(spec.name(), message.author.0, CooldownAxis::User)
                .await;
            if let Some(outcome) = self
                .handle_precheck(message, spec, CooldownAxis::User, checked)
                .await
            {
                return Some(outcome);
            }
        }
        if spec.has_guild_cooldown() {
            if let Some(guild) = message.guild {
                let checked = self
                    .gate
                    .precheck(spec.name(), guild.0, CooldownAxis::Guild)
                    .await;
                if let Some(outcome) = self
                    .handle_precheck(message, spec, CooldownAxis::Guild, checked)
                    .await
                {
                    return Some(outcome);
                }
            }
        }
        None
    }

    async fn handle_precheck(
        &self,
        message: &Message,
        spec: &CommandSpec,
        axis: CooldownAxis,
        checked: Result<Option<std::time::Duration>, crate::cooldown::StoreError>,
    ) -> Option<DispatchOutcome> {
        match checked {
            Ok(None) => None,
            Ok(Some(remaining)) => {
                debug!(command = spec.name(), %axis, ?remaining, "command is on cooldown");
                self.gateway
                    .reply(message, &reply::on_cooldown(remaining))
                    .await;
                Some(DispatchOutcome::OnCooldown(axis, remaining))
            }
            Err(err) => {
                error!(command = spec.name(), %err, "error while checking cooldown");
                self.gateway.reply(message, reply::STORE_TROUBLE).await;
                if spec.execute_if_store_unreachable() {
                    None
                } else {
                    Some(DispatchOutcome::StoreError)
                }
            }
        }
    }

    /// Commit user then guild cooldowns. A failed commit follows the
    /// store-error policy but never rolls back a cooldown already
    /// committed in this pass.
    async fn commit_cooldowns(
        &self,
        message: &Message,
        spec: &CommandSpec,
    ) -> Option<DispatchOutcome> {
        if spec.has_user_cooldown() {
            let committed = self
                .gate
                .commit(
                    spec.name(),
                    message.author.0,
                    CooldownAxis::User,
                    spec.user_cooldown(),
                )
                .await;
            if let Some(outcome) = self.handle_commit(message, spec, committed).await {
                return Some(outcome);
            }
        }
        if spec.has_guild_cooldown() {
            if let Some(guild) = message.guild {
                let committed = self
                    .gate
                    .commit(
                        spec.name(),
                        guild.0,
                        CooldownAxis::Guild,
                        spec.guild_cooldown(),
                    )
                    .await;
                if let Some(outcome) = self.handle_commit(message, spec, committed).await {
                    return Some(outcome);
                }
            }
        }
        None
    }

    async fn handle_commit(
        &self,
        message: &Message,
        spec: &CommandSpec,
        committed: Result<(), crate::cooldown::StoreError>,
    ) -> Option<DispatchOutcome> {
        match committed {
            Ok(()) => None,
            Err(err) => {
                error!(command = spec.name(), %err, "error while saving cooldown");
                self.gateway.reply(message, reply::STORE_TROUBLE).await;
                if spec.execute_if_store_unreachable() {
                    None
                } else {
                    Some(DispatchOutcome::StoreError)
                }
            }
        }
    }
}
