#![cfg(feature = "std")]
//! Wire messages and the server-side API they carry.

use serde::{Deserialize, Serialize};

use crate::common::Coord;
use crate::ranking::RankingEntry;

/// Bumped whenever `Message` changes shape.
pub const PROTOCOL_VERSION: u16 = 1;

/// Answer to a score submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReceipt {
    pub accepted: bool,
    /// Validation error shown to the client when `accepted` is false.
    pub reason: Option<String>,
}

impl ScoreReceipt {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
        }
    }
}

/// Messages exchanged between a game client and the NavyWar server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Opens a session; the server echoes it back.
    Hello { version: u16 },
    /// Forget the computer's previous attacks and start a match on a
    /// `board_size` board.
    ResetGame { board_size: usize },
    ResetAck,
    ComputerMoveReq,
    ComputerMoveResp(Coord),
    RankingReq,
    RankingResp(Vec<RankingEntry>),
    SubmitScore {
        name: Option<String>,
        score: Option<u32>,
    },
    SubmitScoreResp(ScoreReceipt),
    /// The request failed on the server.
    Error { reason: String },
}

/// Services a match needs from the server.
#[async_trait::async_trait]
pub trait GameServer: Send {
    /// Clear per-match server state before a new match.
    async fn reset_match(&mut self, board_size: usize) -> anyhow::Result<()>;
    /// A cell of the human board the computer has not attacked in this match.
    async fn request_computer_move(&mut self) -> anyhow::Result<Coord>;
    /// Ranking, best first.
    async fn fetch_ranking(&mut self) -> anyhow::Result<Vec<RankingEntry>>;
    /// Add a result to the ranking.
    async fn submit_score(
        &mut self,
        name: Option<String>,
        score: Option<u32>,
    ) -> anyhow::Result<ScoreReceipt>;
}

#[async_trait::async_trait]
impl<S: GameServer + ?Sized> GameServer for Box<S> {
    async fn reset_match(&mut self, board_size: usize) -> anyhow::Result<()> {
        (**self).reset_match(board_size).await
    }

    async fn request_computer_move(&mut self) -> anyhow::Result<Coord> {
        (**self).request_computer_move().await
    }

    async fn fetch_ranking(&mut self) -> anyhow::Result<Vec<RankingEntry>> {
        (**self).fetch_ranking().await
    }

    async fn submit_score(
        &mut self,
        name: Option<String>,
        score: Option<u32>,
    ) -> anyhow::Result<ScoreReceipt> {
        (**self).submit_score(name, score).await
    }
}
