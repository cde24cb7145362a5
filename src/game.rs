//! Match state machine: turn arbitration, scoring and game end.
//!
//! Turns strictly alternate: every fresh attack, hit or miss, hands the turn
//! to the other side. Sinking a ship awards its point value to the attacker.
//! A match ends when a fleet is destroyed or when the clock runs out; on
//! timeout the higher score wins and equal scores draw.

use alloc::vec::Vec;
use core::mem;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackOutcome, Coord, EngineError, Side};
use crate::config::GameConfig;
use crate::placement::place_fleet;

/// Whose attack is processed next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    HumanTurn,
    ComputerTurn,
    GameOver,
}

impl TurnState {
    fn of(side: Side) -> Self {
        match side {
            Side::Human => TurnState::HumanTurn,
            Side::Computer => TurnState::ComputerTurn,
        }
    }

    /// Side allowed to attack, `None` once the game is over.
    pub fn active(self) -> Option<Side> {
        match self {
            TurnState::HumanTurn => Some(Side::Human),
            TurnState::ComputerTurn => Some(Side::Computer),
            TurnState::GameOver => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Human,
    Computer,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Winner::Human,
            Side::Computer => Winner::Computer,
        }
    }
}

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    FleetDestroyed,
    TimeExpired,
}

/// Points accumulated by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Scores {
    pub human: u32,
    pub computer: u32,
}

impl Scores {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Human => self.human,
            Side::Computer => self.computer,
        }
    }

    fn add(&mut self, side: Side, points: u32) {
        match side {
            Side::Human => self.human = self.human.saturating_add(points),
            Side::Computer => self.computer = self.computer.saturating_add(points),
        }
    }

    fn leader(&self) -> Winner {
        match self.human.cmp(&self.computer) {
            core::cmp::Ordering::Greater => Winner::Human,
            core::cmp::Ordering::Less => Winner::Computer,
            core::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

/// Notifications for whatever presents the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// `active` may attack now.
    TurnChanged { active: Side },
    /// An attack was resolved against the opponent of `attacker`.
    AttackResolved {
        attacker: Side,
        coord: Coord,
        outcome: AttackOutcome,
        /// Name of the ship hit, if any.
        ship: Option<&'static str>,
        /// Whole footprint of a ship sunk by this attack.
        footprint: Option<Vec<Coord>>,
    },
    GameEnded {
        winner: Winner,
        scores: Scores,
        reason: EndReason,
    },
}

/// A single human-vs-computer match.
#[derive(Debug, Clone)]
pub struct Match {
    id: u64,
    human: Board,
    computer: Board,
    turn: TurnState,
    scores: Scores,
    remaining_secs: u32,
    winner: Option<Winner>,
    end_reason: Option<EndReason>,
    score_recorded: bool,
    events: Vec<GameEvent>,
}

impl Match {
    /// Set up a match with both fleets placed at random.
    pub fn new<R: Rng + ?Sized>(
        id: u64,
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let mut human = Board::new(config.board_size, config.placement_bounds);
        let mut computer = Board::new(config.board_size, config.placement_bounds);
        place_fleet(&config.roster, &mut human, config.placement_attempts, rng)?;
        place_fleet(&config.roster, &mut computer, config.placement_attempts, rng)?;
        Ok(Self::with_boards(id, config, human, computer))
    }

    /// Set up a match from boards placed by the caller.
    pub fn with_boards(id: u64, config: &GameConfig, human: Board, computer: Board) -> Self {
        let first = config.first_turn;
        log::debug!("match {} starts, {} attacks first", id, first);
        Match {
            id,
            human,
            computer,
            turn: TurnState::of(first),
            scores: Scores::default(),
            remaining_secs: config.time_limit_secs,
            winner: None,
            end_reason: None,
            score_recorded: false,
            events: alloc::vec![GameEvent::TurnChanged { active: first }],
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.turn == TurnState::GameOver
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Board holding `side`'s own fleet.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    fn board_mut(&mut self, side: Side) -> &mut Board {
        match side {
            Side::Human => &mut self.human,
            Side::Computer => &mut self.computer,
        }
    }

    /// Attack the opponent of `attacker` at `coord`.
    ///
    /// Out-of-turn attacks and attacks after the game ended are rejected
    /// without touching any state. A repeated cell yields
    /// [`AttackOutcome::AlreadyAttacked`] and the turn does not advance.
    pub fn submit_attack(
        &mut self,
        attacker: Side,
        coord: Coord,
    ) -> Result<AttackOutcome, EngineError> {
        match self.turn.active() {
            None => return Err(EngineError::GameOver),
            Some(side) if side != attacker => return Err(EngineError::NotYourTurn(attacker)),
            Some(_) => {}
        }

        let target = attacker.opponent();
        let outcome = self.board_mut(target).resolve_attack(coord)?;
        log::debug!("match {}: {} attacks {} -> {:?}", self.id, attacker, coord, outcome);

        let ship = outcome.ship().and_then(|id| self.board(target).fleet().ship(id));
        let footprint = match outcome {
            AttackOutcome::HitAndSunk(_) => ship.map(|s| s.cells().to_vec()),
            _ => None,
        };
        let points = match outcome {
            AttackOutcome::HitAndSunk(_) => ship.map(|s| s.spec().points()).unwrap_or(0),
            _ => 0,
        };
        let ship = ship.map(|s| s.name());
        self.events.push(GameEvent::AttackResolved {
            attacker,
            coord,
            outcome,
            ship,
            footprint,
        });
        if !outcome.is_fresh() {
            return Ok(outcome);
        }

        self.scores.add(attacker, points);
        if self.board(target).all_sunk() {
            self.finish(Winner::from(attacker), EndReason::FleetDestroyed);
        } else {
            self.turn = TurnState::of(target);
            self.events.push(GameEvent::TurnChanged { active: target });
        }
        Ok(outcome)
    }

    /// Advance the clock by `secs`. Returns `true` if this call ended the match.
    pub fn tick(&mut self, secs: u32) -> bool {
        if self.is_over() {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            return self.expire();
        }
        false
    }

    /// End the match on points. A no-op on a finished match.
    pub fn expire(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.remaining_secs = 0;
        let winner = self.scores.leader();
        self.finish(winner, EndReason::TimeExpired);
        true
    }

    fn finish(&mut self, winner: Winner, reason: EndReason) {
        self.turn = TurnState::GameOver;
        self.winner = Some(winner);
        self.end_reason = Some(reason);
        log::debug!("match {} over: {:?} ({:?})", self.id, winner, reason);
        self.events.push(GameEvent::GameEnded {
            winner,
            scores: self.scores,
            reason,
        });
    }

    /// Claim the right to record this match's result. Returns `true` only
    /// once, and only after the match ended.
    pub fn mark_score_recorded(&mut self) -> bool {
        if !self.is_over() || self.score_recorded {
            return false;
        }
        self.score_recorded = true;
        true
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}
