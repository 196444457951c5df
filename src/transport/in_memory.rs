use tokio::sync::mpsc;

use crate::protocol::Message;
use crate::transport::{ConnectionClosed, MessageReader, MessageWriter, Transport};

/// One end of an in-process channel pair.
pub struct InMemoryTransport {
    reader: InMemoryReader,
    writer: InMemoryWriter,
}

pub struct InMemoryReader {
    rx: mpsc::UnboundedReceiver<Message>,
}

pub struct InMemoryWriter {
    tx: mpsc::UnboundedSender<Message>,
}

impl InMemoryTransport {
    /// Two connected ends: what one sends, the other receives.
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        (
            Self {
                reader: InMemoryReader { rx: rx1 },
                writer: InMemoryWriter { tx: tx2 },
            },
            Self {
                reader: InMemoryReader { rx: rx2 },
                writer: InMemoryWriter { tx: tx1 },
            },
        )
    }
}

#[async_trait::async_trait]
impl MessageWriter for InMemoryWriter {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.tx.send(msg).map_err(|_| ConnectionClosed)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageReader for InMemoryReader {
    async fn recv(&mut self) -> anyhow::Result<Message> {
        Ok(self.rx.recv().await.ok_or(ConnectionClosed)?)
    }
}

#[async_trait::async_trait]
impl MessageWriter for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.writer.send(msg).await
    }
}

#[async_trait::async_trait]
impl MessageReader for InMemoryTransport {
    async fn recv(&mut self) -> anyhow::Result<Message> {
        self.reader.recv().await
    }
}

impl Transport for InMemoryTransport {
    type Reader = InMemoryReader;
    type Writer = InMemoryWriter;

    fn into_split(self) -> (InMemoryReader, InMemoryWriter) {
        (self.reader, self.writer)
    }
}
