use serde::{Deserialize, Serialize};

use super::scoring;

/// Per-match counters: score, level, lines cleared, and lock tallies.
///
/// Reset by [`Board::start`](super::Board::start); the process-lifetime high
/// score lives on the board, outside the per-match counters.
///
/// # Example
///
/// ```
/// use quadris_engine::MatchStats;
///
/// let mut stats = MatchStats::new();
/// stats.record_lock(4); // quadruple clear at level 1
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.lines_cleared(), 4);
/// assert_eq!(stats.clear_histogram()[4], 1);
/// ```
#[derive(Debug, Clone)]
pub struct MatchStats {
    score: u32,
    lines_cleared: u32,
    pieces_locked: u32,
    clear_histogram: [u32; 5],
}

/// Snapshot of the values the persistence collaborator stores when a match
/// ends: final score, level, and lines cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStats {
    /// Creates counters for a fresh match.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            clear_histogram: [0; 5],
        }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current level, derived from cumulative lines cleared.
    #[must_use]
    pub fn level(&self) -> u32 {
        scoring::level_for_lines(self.lines_cleared)
    }

    /// Cumulative lines cleared this match.
    #[must_use]
    pub const fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Pieces locked into the grid this match.
    #[must_use]
    pub const fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Histogram of lock events by lines cleared: `[0]` counts locks that
    /// cleared nothing, `[1]`–`[4]` count singles through quadruples.
    #[must_use]
    pub const fn clear_histogram(&self) -> &[u32; 5] {
        &self.clear_histogram
    }

    /// Records one lock event and its cleared lines.
    ///
    /// The score delta uses the level in force before the new lines are
    /// counted; a level-up triggered by this clear applies from the next
    /// event.
    pub fn record_lock(&mut self, cleared_lines: usize) {
        self.score += scoring::line_clear_points(cleared_lines, self.level());
        self.pieces_locked += 1;
        if cleared_lines < self.clear_histogram.len() {
            self.clear_histogram[cleared_lines] += 1;
        }
        self.lines_cleared += cleared_lines as u32;
    }

    /// Adds a soft- or hard-drop bonus to the score.
    pub fn add_drop_bonus(&mut self, points: u32) {
        self.score += points;
    }

    /// Snapshot for the persistence collaborator.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            score: self.score,
            level: self.level(),
            lines_cleared: self.lines_cleared,
        }
    }
}
