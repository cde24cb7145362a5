#![cfg(feature = "std")]
//! The NavyWar server: ranking plus the computer's moves.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::common::Coord;
use crate::moves::CandidatePool;
use crate::protocol::{GameServer, ScoreReceipt};
use crate::ranking::{Ranking, RankingEntry};
use crate::skeleton::Skeleton;
use crate::transport::tcp::TcpTransport;

/// In-process [`GameServer`]. Each instance is one session: it owns the set of
/// cells the computer has attacked in the current match and shares the ranking
/// with every other session created from the same [`Ranking`].
pub struct LocalServer {
    ranking: Ranking,
    pool: Option<CandidatePool>,
    rng: SmallRng,
}

impl LocalServer {
    pub fn new(ranking: Ranking, rng: SmallRng) -> Self {
        Self {
            ranking,
            pool: None,
            rng,
        }
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }
}

#[async_trait::async_trait]
impl GameServer for LocalServer {
    async fn reset_match(&mut self, board_size: usize) -> anyhow::Result<()> {
        if board_size == 0 || board_size > crate::config::MAX_BOARD_SIZE {
            return Err(anyhow::anyhow!("unsupported board size {}", board_size));
        }
        self.pool = Some(CandidatePool::new(board_size));
        log::debug!("session reset for a {}x{} board", board_size, board_size);
        Ok(())
    }

    async fn request_computer_move(&mut self) -> anyhow::Result<Coord> {
        let pool = self
            .pool
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("no active match; reset the game first"))?;
        pool.draw(&mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("every cell has already been attacked"))
    }

    async fn fetch_ranking(&mut self) -> anyhow::Result<Vec<RankingEntry>> {
        Ok(self.ranking.all())
    }

    async fn submit_score(
        &mut self,
        name: Option<String>,
        score: Option<u32>,
    ) -> anyhow::Result<ScoreReceipt> {
        match self.ranking.submit(name.as_deref(), score) {
            Ok(()) => Ok(ScoreReceipt::accepted()),
            Err(e) => {
                log::warn!("rejected score submission: {}", e);
                Ok(ScoreReceipt::rejected(e.to_string()))
            }
        }
    }
}

/// How long a session may sit idle between requests, e.g. while the human
/// thinks about their next shot.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Accept connections forever, serving each on its own task with a fresh
/// session that shares `ranking`.
pub async fn serve(listener: TcpListener, ranking: Ranking) -> anyhow::Result<()> {
    log::info!("serving on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        log::info!("client connected from {}", addr);
        let session = LocalServer::new(ranking.clone(), SmallRng::from_rng(&mut rand::rng()));
        tokio::spawn(async move {
            let mut skeleton = Skeleton::new(
                session,
                TcpTransport::with_timeout(stream, SESSION_IDLE_TIMEOUT),
            );
            match skeleton.run().await {
                Ok(()) => log::info!("client {} disconnected", addr),
                Err(e) => log::warn!("session with {} ended: {}", addr, e),
            }
        });
    }
}
