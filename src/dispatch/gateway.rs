//! The event-source collaborator boundary

use async_trait::async_trait;

use crate::types::{Capability, Message};

/// What the dispatcher needs from the chat platform: capability facts
/// about a sender and a way to reply in the message's channel.
///
/// Implemented by the host over its platform connection. Delivery
/// guarantees for replies are the host's concern.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Whether the sender holds the capability in the message's context
    fn has_capability(&self, message: &Message, capability: &Capability) -> bool;

    /// Send a user-visible reply to the message's channel
    async fn reply(&self, message: &Message, text: &str);
}
