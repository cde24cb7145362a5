#![cfg(feature = "std")]
//! Message transports between a game client and the server.

use crate::protocol::Message;

/// A bidirectional, ordered channel of [`Message`]s.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
