//! Common identity and message types shared across the crate

use std::fmt;

/// Chat-platform user identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

/// Chat-platform server (guild) identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuildId(pub u64);

/// Chat-platform channel identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named capability a sender may hold in a given context.
///
/// Capabilities are opaque to this crate; the event-source collaborator
/// decides what they mean (chat-platform permissions, roles, ...). The
/// name is what gets listed in the "missing capabilities" reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One incoming chat message as delivered by the event source.
///
/// Self-authored messages (`author_is_bot`) are never dispatched.
#[derive(Debug, Clone)]
pub struct Message {
    /// Raw message text, prefix included
    pub text: String,
    /// Sender identity
    pub author: UserId,
    /// True when the message was authored by a bot (including this one)
    pub author_is_bot: bool,
    /// Server identity, absent in direct messages
    pub guild: Option<GuildId>,
    /// Channel the message arrived in
    pub channel: ChannelId,
}

impl Message {
    /// Convenience constructor for a user-authored message
    pub fn new(text: impl Into<String>, author: UserId, channel: ChannelId) -> Self {
        Self {
            text: text.into(),
            author,
            author_is_bot: false,
            guild: None,
            channel,
        }
    }

    /// Attach a guild context
    pub fn in_guild(mut self, guild: GuildId) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Mark the message as bot-authored
    pub fn from_bot(mut self) -> Self {
        self.author_is_bot = true;
        self
    }
}
