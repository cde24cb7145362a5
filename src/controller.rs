#![cfg(feature = "std")]
//! Async owner of a match: runs the computer's turns, the countdown and the
//! event stream, and talks to the [`GameServer`].

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use rand::rngs::SmallRng;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::common::{AttackOutcome, Bits, Coord, EngineError, Side};
use crate::config::GameConfig;
use crate::game::{GameEvent, Match, TurnState, Winner};
use crate::moves::{MoveSource, RandomMoveSource};
use crate::protocol::{GameServer, ScoreReceipt};
use crate::ranking::RankingEntry;
use crate::timer::CountdownTimer;

const EVENT_CAPACITY: usize = 256;

/// Drives matches for one human player against the computer.
///
/// Attacks take `&mut self`, so no human attack can slip in while the
/// computer's move is being fetched from the server.
pub struct MatchController<S: GameServer> {
    config: GameConfig,
    player_name: String,
    server: S,
    rng: SmallRng,
    fallback: RandomMoveSource,
    shared: Option<Arc<Mutex<Match>>>,
    timer: Option<CountdownTimer>,
    tick_period: Duration,
    events: broadcast::Sender<GameEvent>,
    receipt: Option<ScoreReceipt>,
    next_id: u64,
}

impl<S: GameServer> MatchController<S> {
    pub fn new(
        config: GameConfig,
        player_name: impl Into<String>,
        server: S,
        rng: SmallRng,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let player_name = player_name.into();
        if player_name.trim().is_empty() {
            return Err(anyhow!("player name is required"));
        }
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            fallback: RandomMoveSource::new(config.move_attempts),
            config,
            player_name,
            server,
            rng,
            shared: None,
            timer: None,
            tick_period: Duration::from_secs(1),
            events,
            receipt: None,
            next_id: 1,
        })
    }

    /// Length of one clock second. Only useful to speed up tests and demos.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Receive every [`GameEvent`] produced from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Match>> {
        let shared = self
            .shared
            .as_ref()
            .ok_or_else(|| anyhow!("no match has been started"))?;
        shared.lock().map_err(|_| anyhow!("match state poisoned"))
    }

    /// Run `f` against the current match, if any.
    pub fn with_match<T>(&self, f: impl FnOnce(&Match) -> T) -> Option<T> {
        let guard = self.lock().ok()?;
        Some(f(&guard))
    }

    /// Whether a match is in progress.
    pub fn is_running(&self) -> bool {
        self.with_match(|m| !m.is_over()).unwrap_or(false)
    }

    fn publish(&self, events: Vec<GameEvent>) {
        for event in events {
            log::debug!("event: {:?}", event);
            let _ = self.events.send(event);
        }
    }

    /// Start a new match. Fails while another match is still running, and
    /// when the fleets cannot be placed. A previous match ended by the clock
    /// is settled first.
    pub async fn start(&mut self) -> anyhow::Result<u64> {
        if self.is_running() {
            return Err(anyhow!("a match is already in progress"));
        }
        if self.shared.is_some() {
            self.settle().await?;
        }
        self.stop_timer();
        self.receipt = None;

        if let Err(e) = self.server.reset_match(self.config.board_size).await {
            log::warn!("server reset failed, computer moves will be drawn locally: {}", e);
        }

        let id = self.next_id;
        let mut m = Match::new(id, &self.config, &mut self.rng)
            .map_err(|e| anyhow!("match setup failed: {}", e))?;
        self.next_id += 1;
        let pending = m.drain_events();
        let shared = Arc::new(Mutex::new(m));
        self.timer = Some(CountdownTimer::start(
            shared.clone(),
            self.events.clone(),
            self.tick_period,
        ));
        self.shared = Some(shared);
        log::info!(
            "match {} started for {} ({}s on the clock)",
            id,
            self.player_name,
            self.config.time_limit_secs
        );
        self.publish(pending);

        if self.with_match(|m| m.turn()) == Some(TurnState::ComputerTurn) {
            self.computer_turn().await?;
        }
        Ok(id)
    }

    /// Human attack at `coord`. When the attack hands over the turn, the
    /// computer answers before this returns. A match that ends here, or that
    /// the clock already ended, is settled before returning.
    pub async fn attack(&mut self, coord: Coord) -> anyhow::Result<AttackOutcome> {
        let submitted = {
            let mut m = self.lock()?;
            m.submit_attack(Side::Human, coord)
                .map(|outcome| (outcome, m.drain_events(), m.turn()))
        };
        let (outcome, pending, turn) = match submitted {
            Ok(submitted) => submitted,
            Err(e @ EngineError::GameOver) => {
                self.settle().await?;
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        self.publish(pending);

        match turn {
            TurnState::ComputerTurn => self.computer_turn().await?,
            TurnState::GameOver => self.settle().await?,
            TurnState::HumanTurn => {}
        }
        Ok(outcome)
    }

    async fn computer_turn(&mut self) -> anyhow::Result<()> {
        loop {
            let exclude = match self.with_match(|m| {
                (m.turn() == TurnState::ComputerTurn).then(|| m.board(Side::Human).attacked())
            }) {
                Some(Some(exclude)) => exclude,
                _ => return Ok(()),
            };
            let coord = self.computer_move(&exclude).await?;

            let (result, pending, turn) = {
                let mut m = self.lock()?;
                let result = m.submit_attack(Side::Computer, coord);
                (result, m.drain_events(), m.turn())
            };
            self.publish(pending);

            match result {
                Ok(outcome) if outcome.is_fresh() => {}
                Ok(_) => {
                    log::warn!("computer repeated {}, drawing again", coord);
                    continue;
                }
                // The clock ran out while the move was in flight.
                Err(EngineError::GameOver) => return self.settle().await,
                Err(e) => return Err(e.into()),
            }
            if turn == TurnState::GameOver {
                self.settle().await?;
            }
            return Ok(());
        }
    }

    /// Ask the server for a move; anything unusable is replaced by a local
    /// draw among the cells not attacked yet.
    async fn computer_move(&mut self, exclude: &Bits) -> anyhow::Result<Coord> {
        match self.server.request_computer_move().await {
            Ok(coord) if !exclude.get(coord.row, coord.col).unwrap_or(true) => return Ok(coord),
            Ok(coord) => log::warn!("server proposed unusable cell {}, drawing locally", coord),
            Err(e) => log::warn!("computer move request failed, drawing locally: {}", e),
        }
        self.fallback
            .next_move(&mut self.rng, exclude)
            .map_err(|e| anyhow!("computer has no move left: {}", e))
    }

    /// Settle a finished match and hand out its score receipt. The receipt
    /// is returned once, by the first call after the human's win was
    /// submitted; later calls and unfinished matches yield `None`.
    pub async fn finish(&mut self) -> anyhow::Result<Option<ScoreReceipt>> {
        self.settle().await?;
        Ok(self.receipt.take())
    }

    /// Stop the clock of a finished match and, when the human won, submit
    /// their score exactly once. An unreachable server turns into a rejected
    /// receipt.
    async fn settle(&mut self) -> anyhow::Result<()> {
        let claim = {
            let mut m = self.lock()?;
            if !m.is_over() {
                return Ok(());
            }
            let won = m.winner() == Some(Winner::Human);
            (won && m.mark_score_recorded()).then(|| m.scores().human)
        };
        self.stop_timer();

        let Some(score) = claim else {
            return Ok(());
        };
        let receipt = match self
            .server
            .submit_score(Some(self.player_name.clone()), Some(score))
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                log::warn!("could not submit score for {}: {}", self.player_name, e);
                ScoreReceipt::rejected(format!("ranking unavailable: {}", e))
            }
        };
        if receipt.accepted {
            log::info!("{} entered the ranking with {} points", self.player_name, score);
        }
        self.receipt = Some(receipt);
        Ok(())
    }

    /// Current ranking, after settling a match the clock may have ended.
    pub async fn ranking(&mut self) -> anyhow::Result<Vec<RankingEntry>> {
        if self.shared.is_some() {
            self.settle().await?;
        }
        self.server.fetch_ranking().await
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
