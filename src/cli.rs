#![cfg(feature = "std")]
//! Text rendering for the terminal client.

use std::fmt::Write;

use crate::board::Board;
use crate::common::{AttackOutcome, Coord, Side};
use crate::game::{EndReason, GameEvent, Winner};
use crate::ranking::RankingEntry;

/// Parse grid notation (`B7`: column letter, 1-based row). Case-insensitive.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Coord::new(row - 1, (col_ch as u8 - b'A') as usize))
}

/// Draw `board` as a grid. `X` is a hit, `o` a miss and, when `reveal` is
/// set, `S` an intact ship cell.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let mut out = String::from("   ");
    for c in 0..size {
        let _ = write!(out, " {}", column_label(c));
    }
    out.push('\n');
    for r in 0..size {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..size {
            let ch = if board.hits().get(r, c).unwrap_or(false) {
                'X'
            } else if board.misses().get(r, c).unwrap_or(false) {
                'o'
            } else if reveal && board.ship_map().get(r, c).unwrap_or(false) {
                'S'
            } else {
                '.'
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

fn column_label(c: usize) -> char {
    u8::try_from(c)
        .ok()
        .filter(|c| *c < 26)
        .map(|c| (b'A' + c) as char)
        .unwrap_or('?')
}

/// One-line description of `event` from the human's point of view.
pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::TurnChanged { active: Side::Human } => "Your turn.".to_string(),
        GameEvent::TurnChanged { active: Side::Computer } => {
            "The computer is aiming...".to_string()
        }
        GameEvent::AttackResolved {
            attacker,
            coord,
            outcome,
            ship,
            ..
        } => {
            let who = match attacker {
                Side::Human => "You fire",
                Side::Computer => "The computer fires",
            };
            let ship = ship.unwrap_or("ship");
            match outcome {
                AttackOutcome::AlreadyAttacked => format!("{} at {}: already attacked", who, coord),
                AttackOutcome::Miss => format!("{} at {}: miss", who, coord),
                AttackOutcome::Hit(_) => format!("{} at {}: hit the {}", who, coord, ship),
                AttackOutcome::HitAndSunk(_) => {
                    format!("{} at {}: hit and sunk the {}!", who, coord, ship)
                }
            }
        }
        GameEvent::GameEnded {
            winner,
            scores,
            reason,
        } => {
            let verdict = match winner {
                Winner::Human => "You win",
                Winner::Computer => "The computer wins",
                Winner::Draw => "Draw",
            };
            let why = match reason {
                EndReason::FleetDestroyed => "fleet destroyed",
                EndReason::TimeExpired => "time is up",
            };
            format!(
                "{} ({}). Score: you {} / computer {}",
                verdict, why, scores.human, scores.computer
            )
        }
    }
}

/// Numbered ranking table, best first.
pub fn render_ranking(entries: &[RankingEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{:3}. {:<20} {:>6}", i + 1, entry.name, entry.score);
    }
    out
}
