//! Session drivers: run a connection over a [`Transport`].
//!
//! A session performs the [`Message::Hello`] handshake, attaches the
//! connection to a fresh writer queue drained by a single writer task, then
//! feeds inbound messages to the connection until the peer goes away or
//! violates the protocol. Either way the connection is disconnected on exit.

use std::sync::Arc;

use anyhow::Context as _;
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};

use crate::connection::{AgentConnection, RefereeConnection};
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::transport::{is_closed, MessageReader, MessageWriter, Transport};

/// Referee connection shared between the session and the match coordinator.
pub type SharedReferee = Arc<Mutex<RefereeConnection>>;

/// Exchange [`Message::Hello`] with the peer and check the protocol version.
pub async fn handshake<T: Transport>(transport: &mut T) -> anyhow::Result<()> {
    transport
        .send(Message::Hello {
            version: PROTOCOL_VERSION,
        })
        .await?;
    match transport.recv().await? {
        Message::Hello { version } if version == PROTOCOL_VERSION => Ok(()),
        Message::Hello { version } => Err(anyhow::anyhow!(
            "Protocol version mismatch: expected {}, got {}",
            PROTOCOL_VERSION,
            version
        )),
        other => Err(anyhow::anyhow!(
            "Expected Hello, got {} (closing session)",
            other.kind()
        )),
    }
}

/// Drain the writer queue into the transport until every sender is gone.
async fn pump_outbound<W: MessageWriter>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<Message>,
) -> anyhow::Result<()> {
    while let Some(msg) = rx.recv().await {
        writer.send(msg).await?;
    }
    Ok(())
}

/// Run the inbound loop, mapping an orderly close to `Ok`.
async fn read_loop<R, F, Fut>(mut reader: R, mut handle: F) -> anyhow::Result<()>
where
    R: MessageReader,
    F: FnMut(Message) -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<()>>,
{
    loop {
        match reader.recv().await {
            Ok(msg) => handle(msg).await?,
            Err(e) if is_closed(&e) => {
                debug!("peer closed the session");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Serve one agent host on the referee side.
///
/// Fails with [`crate::connection::ConnectionError::AlreadyConnected`] if
/// another agent host is attached.
pub async fn serve_referee<T: Transport>(mut transport: T, referee: SharedReferee) -> anyhow::Result<()> {
    handshake(&mut transport).await?;
    let (tx, rx) = mpsc::unbounded_channel();
    referee.lock().await.connect(tx)?;
    info!("agent host attached");

    let (reader, writer) = transport.into_split();
    let pump = tokio::spawn(pump_outbound(writer, rx));

    let result = read_loop(reader, |msg| {
        let referee = referee.clone();
        async move {
            referee
                .lock()
                .await
                .handle(msg)
                .context("protocol violation by agent host")
        }
    })
    .await;

    referee.lock().await.disconnect();
    finish_pump(pump).await;
    result
}

/// Serve the referee on the agent-host side.
pub async fn serve_agent<T: Transport>(mut transport: T, agent: AgentConnection) -> anyhow::Result<()> {
    handshake(&mut transport).await?;
    let (tx, rx) = mpsc::unbounded_channel();
    agent.connect(tx).await?;
    info!("connected to referee");

    let (reader, writer) = transport.into_split();
    let pump = tokio::spawn(pump_outbound(writer, rx));

    let result = read_loop(reader, |msg| {
        let agent = agent.clone();
        async move {
            agent
                .handle(msg)
                .await
                .context("protocol violation by referee")
        }
    })
    .await;

    agent.disconnect().await;
    finish_pump(pump).await;
    result
}

async fn finish_pump(pump: tokio::task::JoinHandle<anyhow::Result<()>>) {
    match pump.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) if is_closed(&e) => {}
        Ok(Err(e)) => warn!("writer stopped: {:#}", e),
        Err(e) => warn!("writer task failed: {}", e),
    }
}
