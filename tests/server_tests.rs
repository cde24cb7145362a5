use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use navywar::protocol::{Message, PROTOCOL_VERSION};
use navywar::transport::tcp::TcpTransport;
use navywar::transport::Transport;
use navywar::{serve, GameServer, InMemoryTransport, LocalServer, Ranking, RemoteServer, Skeleton};
use rand::{rngs::SmallRng, SeedableRng};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_local_server_moves_and_ranking() -> anyhow::Result<()> {
    let mut server = LocalServer::new(Ranking::new(), SmallRng::seed_from_u64(1));
    assert!(server.request_computer_move().await.is_err());

    server.reset_match(3).await?;
    let mut seen = HashSet::new();
    for _ in 0..9 {
        let coord = server.request_computer_move().await?;
        assert!(coord.row < 3 && coord.col < 3);
        assert!(seen.insert(coord));
    }
    assert!(server.request_computer_move().await.is_err());

    server.reset_match(3).await?;
    assert!(server.request_computer_move().await.is_ok());
    assert!(server.reset_match(0).await.is_err());
    assert!(server.reset_match(65).await.is_err());

    let receipt = server.submit_score(Some("Ana".into()), Some(300)).await?;
    assert!(receipt.accepted);
    let receipt = server.submit_score(None, Some(300)).await?;
    assert!(!receipt.accepted);
    assert!(receipt.reason.is_some());
    assert_eq!(server.fetch_ranking().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_skeleton_and_stub_in_memory() -> anyhow::Result<()> {
    let ranking = Ranking::new();
    let (client_side, server_side) = InMemoryTransport::pair();
    let session = LocalServer::new(ranking.clone(), SmallRng::seed_from_u64(2));
    let server = tokio::spawn(async move { Skeleton::new(session, server_side).run().await });

    let mut stub = RemoteServer::new(client_side);
    // Error replies come back as errors.
    assert!(stub.request_computer_move().await.is_err());
    stub.reset_match(10).await?;
    let coord = stub.request_computer_move().await?;
    assert!(coord.row < 10 && coord.col < 10);

    stub.submit_score(Some("Bea".into()), Some(500)).await?;
    stub.submit_score(Some("Ana".into()), Some(300)).await?;
    stub.submit_score(Some("Cid".into()), Some(500)).await?;
    let rejected = stub.submit_score(Some("Dee".into()), None).await?;
    assert!(!rejected.accepted);

    let names: Vec<String> = stub.fetch_ranking().await?.into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Bea", "Cid", "Ana"]);
    assert_eq!(ranking.len(), 3);

    drop(stub);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sessions_share_the_ranking_over_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let ranking = Ranking::new();
    let server = tokio::spawn(serve(listener, ranking.clone()));

    let mut first = RemoteServer::new(TcpTransport::connect(addr).await?);
    let mut second = RemoteServer::new(TcpTransport::connect(addr).await?);

    first.reset_match(20).await?;
    second.reset_match(2).await?;
    for _ in 0..4 {
        second.request_computer_move().await?;
    }
    // Each connection has its own move pool.
    assert!(second.request_computer_move().await.is_err());
    assert!(first.request_computer_move().await.is_ok());

    first.submit_score(Some("Ana".into()), Some(120)).await?;
    let seen_by_second = second.fetch_ranking().await?;
    assert_eq!(seen_by_second.len(), 1);
    assert_eq!(seen_by_second[0].score, 120);
    assert_eq!(ranking.len(), 1);

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_version_mismatch_is_rejected() -> anyhow::Result<()> {
    let (mut client, server_side) = InMemoryTransport::pair();
    let session = LocalServer::new(Ranking::new(), SmallRng::seed_from_u64(3));
    let server = tokio::spawn(async move { Skeleton::new(session, server_side).run().await });

    client
        .send(Message::Hello {
            version: PROTOCOL_VERSION + 1,
        })
        .await?;
    assert!(matches!(client.recv().await?, Message::Error { .. }));
    assert!(server.await?.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let peer = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        socket.write_all(&[0xFF, 0xFF, 0xFF, 0xFF]).await?;
        socket.flush().await?;
        Ok::<_, std::io::Error>(socket)
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("too large"));
    let _socket = peer.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_length_frame_is_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let peer = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        socket.write_all(&0u32.to_be_bytes()).await?;
        socket.flush().await?;
        Ok::<_, std::io::Error>(socket)
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("Invalid message length"));
    let _socket = peer.await??;
    Ok(())
}

/// Transport whose `fail_at`-th receive times out while the reply stays
/// queued, as a late reply would on a slow link.
struct StallingTransport {
    inner: InMemoryTransport,
    sends: Arc<AtomicUsize>,
    recvs: usize,
    fail_at: usize,
}

#[async_trait::async_trait]
impl Transport for StallingTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.inner.send(msg).await
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recvs += 1;
        if self.recvs == self.fail_at {
            return Err(anyhow::anyhow!("Timed out waiting for message"));
        }
        self.inner.recv().await
    }
}

#[tokio::test]
async fn test_stub_stops_after_lost_reply() -> anyhow::Result<()> {
    let (client_side, server_side) = InMemoryTransport::pair();
    let session = LocalServer::new(Ranking::new(), SmallRng::seed_from_u64(4));
    let server = tokio::spawn(async move { Skeleton::new(session, server_side).run().await });

    let sends = Arc::new(AtomicUsize::new(0));
    let mut stub = RemoteServer::new(StallingTransport {
        inner: client_side,
        sends: sends.clone(),
        recvs: 0,
        fail_at: 2,
    });
    // Handshake succeeds, the reset reply is lost.
    assert!(stub.reset_match(10).await.is_err());
    assert!(stub.is_broken());
    assert_eq!(sends.load(Ordering::SeqCst), 2);

    // The late ResetAck must never be read as the answer to a later request.
    let err = stub.fetch_ranking().await.unwrap_err();
    assert!(err.to_string().contains("Connection lost"));
    assert!(stub.request_computer_move().await.is_err());
    assert!(stub.submit_score(Some("Ana".into()), Some(10)).await.is_err());
    assert_eq!(sends.load(Ordering::SeqCst), 2);

    server.abort();
    Ok(())
}
