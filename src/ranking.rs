#![cfg(feature = "std")]
//! Process-wide ranking of finished matches.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// One recorded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    /// Name missing or blank.
    EmptyName,
    /// Score missing.
    MissingScore,
}

impl fmt::Display for RankingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingError::EmptyName => write!(f, "player name is required"),
            RankingError::MissingScore => write!(f, "score is required"),
        }
    }
}

impl std::error::Error for RankingError {}

/// Ranking kept in descending score order. Among equal scores, earlier
/// entries come first. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Arc<Mutex<Vec<RankingEntry>>>,
}

impl Ranking {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RankingEntry>> {
        // The list only changes through a single insert, so a poisoned
        // lock still guards a sorted list.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a result. Names are trimmed; a blank name is rejected.
    pub fn record(&self, name: &str, score: u32) -> Result<(), RankingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RankingError::EmptyName);
        }
        let mut entries = self.lock();
        let at = entries.partition_point(|e| e.score >= score);
        entries.insert(
            at,
            RankingEntry {
                name: name.to_string(),
                score,
            },
        );
        log::info!("ranking: recorded {} with {} points (rank {})", name, score, at + 1);
        Ok(())
    }

    /// Validate an incoming submission where either field may be absent.
    pub fn submit(&self, name: Option<&str>, score: Option<u32>) -> Result<(), RankingError> {
        let name = name.ok_or(RankingError::EmptyName)?;
        let score = score.ok_or(RankingError::MissingScore)?;
        self.record(name, score)
    }

    /// Every entry, best first.
    pub fn all(&self) -> Vec<RankingEntry> {
        self.lock().clone()
    }

    /// The best `n` entries.
    pub fn top(&self, n: usize) -> Vec<RankingEntry> {
        self.lock().iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
