#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::protocol::{GameServer, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Server side of a session: decodes requests from `transport` and answers
/// them with `server`.
pub struct Skeleton<S: GameServer, T: Transport> {
    server: S,
    transport: T,
}

impl<S: GameServer, T: Transport> Skeleton<S, T> {
    pub fn new(server: S, transport: T) -> Self {
        Self { server, transport }
    }

    /// Serve until the peer goes away. Fails only on a bad handshake or when a
    /// reply cannot be sent.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport.send(Message::Hello { version }).await?;
            }
            Message::Hello { version } => {
                let reason = format!(
                    "protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION, version
                );
                let _ = self.transport.send(Message::Error { reason: reason.clone() }).await;
                return Err(anyhow!(reason));
            }
            other => return Err(anyhow!("Expected handshake, got {:?}", other)),
        }

        while let Ok(msg) = self.transport.recv().await {
            let reply = self.dispatch(msg).await;
            self.transport.send(reply).await?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, msg: Message) -> Message {
        let result = match msg {
            Message::ResetGame { board_size } => self
                .server
                .reset_match(board_size)
                .await
                .map(|()| Message::ResetAck),
            Message::ComputerMoveReq => self
                .server
                .request_computer_move()
                .await
                .map(Message::ComputerMoveResp),
            Message::RankingReq => self.server.fetch_ranking().await.map(Message::RankingResp),
            Message::SubmitScore { name, score } => self
                .server
                .submit_score(name, score)
                .await
                .map(Message::SubmitScoreResp),
            other => Err(anyhow!("unexpected request {:?}", other)),
        };
        result.unwrap_or_else(|e| Message::Error {
            reason: e.to_string(),
        })
    }
}
