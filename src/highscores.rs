//! High score leaderboard
//!
//! Five places, best first. Persisted as plain text: two lines per record
//! (name, then integer score) for exactly five records in table order.

use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_SCORE_PLACES, MAX_NAME_LEN, PLACEHOLDER_NAME};
use crate::error::PersistError;
use crate::platform::TextStore;

/// Storage key of the leaderboard
pub const HIGH_SCORE_KEY: &str = "highscores.txt";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighScoreEntry {
    fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            score: 0,
        }
    }
}

/// Names are single-line and at most six characters
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LEN)
        .collect()
}

/// High score leaderboard, always exactly [`HIGH_SCORE_PLACES`] entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl HighScoreTable {
    /// Table of `----` / 0 entries
    pub fn placeholder() -> Self {
        Self {
            entries: vec![HighScoreEntry::placeholder(); HIGH_SCORE_PLACES],
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// A score qualifies when it beats the last place
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank (1-based) a score would take, if it qualifies
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        // Ties keep the older entry ahead
        let index = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        Some(index + 1)
    }

    /// Insert a qualifying score, dropping the last place.
    /// Returns the rank achieved, or None if it didn't qualify.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                name: clean_name(name),
                score,
            },
        );
        self.entries.truncate(HIGH_SCORE_PLACES);
        log::info!("High score {score} placed #{rank}");
        Some(rank)
    }

    /// Encode as two lines per record
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&clean_name(&entry.name));
            out.push('\n');
            out.push_str(&entry.score.to_string());
            out.push('\n');
        }
        out
    }

    /// Decode the two-lines-per-record format.
    ///
    /// Short files are padded with placeholders and the result is re-sorted;
    /// a dangling name or a non-integer score is corrupt.
    pub fn from_text(text: &str) -> Result<Self, PersistError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() % 2 != 0 {
            return Err(PersistError::Corrupt {
                line: lines.len(),
                reason: "name without a score".into(),
            });
        }

        let mut entries = Vec::with_capacity(HIGH_SCORE_PLACES);
        for (i, pair) in lines.chunks(2).take(HIGH_SCORE_PLACES).enumerate() {
            let score = pair[1]
                .trim()
                .parse::<u32>()
                .map_err(|e| PersistError::Corrupt {
                    line: i * 2 + 2,
                    reason: format!("bad score {:?}: {e}", pair[1]),
                })?;
            entries.push(HighScoreEntry {
                name: clean_name(pair[0]),
                score,
            });
        }
        entries.resize(HIGH_SCORE_PLACES, HighScoreEntry::placeholder());
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(Self { entries })
    }
}

/// Where the leaderboard lives
pub trait HighScoreRepository {
    fn load(&self) -> Result<HighScoreTable, PersistError>;
    fn save(&mut self, table: &HighScoreTable) -> Result<(), PersistError>;
}

/// Leaderboard kept under [`HIGH_SCORE_KEY`] in a text store
#[derive(Debug, Clone, Default)]
pub struct StoredHighScores<S> {
    store: S,
}

impl<S: TextStore> StoredHighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: TextStore> HighScoreRepository for StoredHighScores<S> {
    /// A missing file is an empty (placeholder) table
    fn load(&self) -> Result<HighScoreTable, PersistError> {
        match self.store.read(HIGH_SCORE_KEY)? {
            Some(text) => HighScoreTable::from_text(&text),
            None => Ok(HighScoreTable::placeholder()),
        }
    }

    fn save(&mut self, table: &HighScoreTable) -> Result<(), PersistError> {
        self.store.write(HIGH_SCORE_KEY, &table.to_text())
    }
}

/// Load the table, falling back to placeholders on any error
pub fn load_or_placeholder(repo: &dyn HighScoreRepository) -> HighScoreTable {
    match repo.load() {
        Ok(table) => table,
        Err(e) => {
            log::warn!("High scores unreadable, starting fresh: {e}");
            HighScoreTable::placeholder()
        }
    }
}
