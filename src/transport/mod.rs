//! Message transports between the referee and an agent host.
//!
//! A [`Transport`] is a duplex channel of [`Message`]s. Sessions split it into
//! a [`MessageReader`] owned by the inbound loop and a [`MessageWriter`] owned
//! by the single writer task.

use thiserror::Error;

use crate::protocol::Message;

pub mod in_memory;
pub mod tcp;

pub use in_memory::InMemoryTransport;
pub use tcp::TcpTransport;

/// The peer closed the channel in an orderly way.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("connection closed by peer")]
pub struct ConnectionClosed;

/// `true` if `err` is, or wraps, an orderly close of the channel.
pub fn is_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ConnectionClosed>().is_some()
}

#[async_trait::async_trait]
pub trait MessageWriter: Send {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait MessageReader: Send {
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub trait Transport: MessageReader + MessageWriter {
    type Reader: MessageReader + 'static;
    type Writer: MessageWriter + 'static;

    /// Split into independently owned halves.
    fn into_split(self) -> (Self::Reader, Self::Writer);
}
