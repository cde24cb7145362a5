#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::common::Coord;
use crate::protocol::{GameServer, Message, ScoreReceipt, PROTOCOL_VERSION};
use crate::ranking::RankingEntry;
use crate::transport::Transport;

/// Client side of a session: a [`GameServer`] backed by a remote server.
///
/// Requests and replies are paired by order. After a transport failure the
/// pairing can no longer be trusted, so every later request fails until a
/// new stub is built on a fresh connection.
pub struct RemoteServer<T: Transport> {
    transport: T,
    handshaken: bool,
    broken: bool,
}

impl<T: Transport> RemoteServer<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
            broken: false,
        }
    }

    /// Whether a transport failure has disabled this stub.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    async fn exchange(&mut self, msg: Message) -> anyhow::Result<Message> {
        if self.broken {
            return Err(anyhow!("Connection lost; reconnect to continue"));
        }
        let reply = async {
            self.transport.send(msg).await?;
            self.transport.recv().await
        }
        .await;
        if let Err(e) = &reply {
            log::warn!("server connection lost: {}", e);
            self.broken = true;
        }
        reply
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        match self
            .exchange(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?
        {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::Hello { version } => Err(anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            Message::Error { reason } => Err(anyhow!("Handshake rejected: {}", reason)),
            other => Err(anyhow!("Expected handshake, got {:?}", other)),
        }
    }

    async fn request(&mut self, msg: Message) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        match self.exchange(msg).await? {
            Message::Error { reason } => Err(anyhow!("Server error: {}", reason)),
            reply => Ok(reply),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameServer for RemoteServer<T> {
    async fn reset_match(&mut self, board_size: usize) -> anyhow::Result<()> {
        match self.request(Message::ResetGame { board_size }).await? {
            Message::ResetAck => Ok(()),
            other => Err(anyhow!("Unexpected reply to reset: {:?}", other)),
        }
    }

    async fn request_computer_move(&mut self) -> anyhow::Result<Coord> {
        match self.request(Message::ComputerMoveReq).await? {
            Message::ComputerMoveResp(coord) => Ok(coord),
            other => Err(anyhow!("Unexpected reply to move request: {:?}", other)),
        }
    }

    async fn fetch_ranking(&mut self) -> anyhow::Result<Vec<RankingEntry>> {
        match self.request(Message::RankingReq).await? {
            Message::RankingResp(entries) => Ok(entries),
            other => Err(anyhow!("Unexpected reply to ranking request: {:?}", other)),
        }
    }

    async fn submit_score(
        &mut self,
        name: Option<String>,
        score: Option<u32>,
    ) -> anyhow::Result<ScoreReceipt> {
        match self.request(Message::SubmitScore { name, score }).await? {
            Message::SubmitScoreResp(receipt) => Ok(receipt),
            other => Err(anyhow!("Unexpected reply to score submission: {:?}", other)),
        }
    }
}
