//! Framed TCP transport: a 4-byte big-endian length prefix followed by a
//! bincode-encoded [`Message`].

use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::timeout;

use crate::config::TransportConfig;
use crate::protocol::Message;
use crate::transport::{ConnectionClosed, MessageReader, MessageWriter, Transport};

pub struct TcpTransport {
    stream: TcpStream,
    config: TransportConfig,
}

pub struct TcpReader {
    half: OwnedReadHalf,
    config: TransportConfig,
}

pub struct TcpWriter {
    half: OwnedWriteHalf,
    config: TransportConfig,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, TransportConfig::default())
    }

    pub fn with_config(stream: TcpStream, config: TransportConfig) -> Self {
        Self { stream, config }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

fn map_io(e: std::io::Error, what: &str) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            ConnectionClosed.into()
        }
        _ => anyhow::anyhow!("{} error: {}", what, e),
    }
}

async fn write_frame<W>(writer: &mut W, msg: &Message, config: &TransportConfig) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let data =
        bincode::serialize(msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u64 > config.max_frame_size as u64 {
        return Err(anyhow::anyhow!(
            "Message too large: {} bytes (max: {})",
            data.len(),
            config.max_frame_size
        ));
    }

    let send_op = async {
        let len = (data.len() as u32).to_be_bytes();
        writer.write_all(&len).await.map_err(|e| map_io(e, "Write"))?;
        writer.write_all(&data).await.map_err(|e| map_io(e, "Write"))?;
        writer.flush().await.map_err(|e| map_io(e, "Write"))?;
        anyhow::Ok(())
    };
    timeout(config.write_timeout, send_op)
        .await
        .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", config.write_timeout))?
}

async fn read_frame<R>(reader: &mut R, config: &TransportConfig) -> anyhow::Result<Message>
where
    R: AsyncRead + Unpin + Send,
{
    let recv_op = async {
        let mut len_buf = [0u8; 4];
        reader
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| map_io(e, "Read"))?;

        let len = u32::from_be_bytes(len_buf);
        if len > config.max_frame_size {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                len,
                config.max_frame_size
            ));
        }
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid message length: 0"));
        }

        let mut buf = vec![0u8; len as usize];
        reader
            .read_exact(&mut buf)
            .await
            .map_err(|e| map_io(e, "Read"))?;

        let msg = bincode::deserialize::<Message>(&buf)
            .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
        anyhow::Ok(msg)
    };

    match config.read_timeout {
        Some(limit) => timeout(limit, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?,
        None => recv_op.await,
    }
}

#[async_trait::async_trait]
impl MessageWriter for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        write_frame(&mut self.stream, &msg, &self.config).await
    }
}

#[async_trait::async_trait]
impl MessageReader for TcpTransport {
    async fn recv(&mut self) -> anyhow::Result<Message> {
        read_frame(&mut self.stream, &self.config).await
    }
}

#[async_trait::async_trait]
impl MessageWriter for TcpWriter {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        write_frame(&mut self.half, &msg, &self.config).await
    }
}

#[async_trait::async_trait]
impl MessageReader for TcpReader {
    async fn recv(&mut self) -> anyhow::Result<Message> {
        read_frame(&mut self.half, &self.config).await
    }
}

impl Transport for TcpTransport {
    type Reader = TcpReader;
    type Writer = TcpWriter;

    fn into_split(self) -> (TcpReader, TcpWriter) {
        let (read, write) = self.stream.into_split();
        (
            TcpReader {
                half: read,
                config: self.config,
            },
            TcpWriter {
                half: write,
                config: self.config,
            },
        )
    }
}
