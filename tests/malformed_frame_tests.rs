use std::time::Duration;

use broadside::config::TransportConfig;
use broadside::protocol::Message;
use broadside::transport::{MessageReader, MessageWriter, TcpTransport};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

/// Connect a client transport to a raw server socket that writes `bytes`.
async fn client_receiving(bytes: Vec<u8>, config: TransportConfig) -> anyhow::Result<anyhow::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        socket.write_all(&bytes).await?;
        socket.flush().await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        anyhow::Ok(())
    });

    let stream = TcpStream::connect(addr).await?;
    let mut transport = TcpTransport::with_config(stream, config);
    let err = transport
        .recv()
        .await
        .expect_err("malformed frame must not decode");
    server.await??;
    Ok(err)
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_length_prefix() -> anyhow::Result<()> {
    let err = client_receiving(vec![0xFF, 0xFF, 0xFF, 0xFF], TransportConfig::default()).await?;
    assert!(err.to_string().contains("too large"), "{err:#}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_length_frame() -> anyhow::Result<()> {
    let err = client_receiving(vec![0, 0, 0, 0], TransportConfig::default()).await?;
    assert!(err.to_string().contains("length: 0"), "{err:#}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn garbage_body() -> anyhow::Result<()> {
    let mut bytes = 4u32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&[0xEE, 0xEE, 0xEE, 0xEE]);
    let err = client_receiving(bytes, TransportConfig::default()).await?;
    assert!(err.to_string().contains("Deserialization"), "{err:#}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn silent_peer_hits_the_read_timeout() -> anyhow::Result<()> {
    let config = TransportConfig {
        read_timeout: Some(Duration::from_millis(50)),
        ..TransportConfig::default()
    };
    let err = client_receiving(Vec::new(), config).await?;
    assert!(err.to_string().contains("timeout"), "{err:#}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_outbound_message_is_refused() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move { listener.accept().await.map(|_| ()) });

    let stream = TcpStream::connect(addr).await?;
    let config = TransportConfig {
        max_frame_size: 8,
        ..TransportConfig::default()
    };
    let mut transport = TcpTransport::with_config(stream, config);
    let err = transport
        .send(Message::ShotCoordinate {
            game_id: uuid::Uuid::new_v4(),
            location: "A1".into(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("too large"), "{err:#}");
    server.await??;
    Ok(())
}
