use std::time::Duration;

use crate::{
    PieceCollisionError, TopOutError,
    core::{
        grid::Grid,
        piece::{Piece, Spin},
        shape::ShapeKind,
    },
};

use super::{
    match_stats::{MatchStats, MatchSummary},
    piece_queue::{PieceQueue, QueueSeed},
    scoring,
};

/// Where a match stands.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum MatchStatus {
    /// Constructed, never started.
    NotStarted,
    /// A piece is in play and gravity ticks apply.
    Running,
    /// Frozen; only un-pausing (or nothing) changes state.
    Paused,
    /// A spawned piece overlapped settled cells; only `start` leaves this.
    GameOver,
}

/// The aggregate root of a match: grid, live piece, lookahead, counters, and
/// the match state machine.
///
/// `Board` is driven from the outside by two serialized event sources — a
/// periodic gravity tick and discrete player commands. Every command runs to
/// completion synchronously; commands arriving in the wrong state, and moves
/// blocked by geometry, are silent no-ops rather than errors. After any
/// command the renderer reads the new state through the query surface.
///
/// A board is constructed once per process and reused across matches:
/// [`Board::start`] resets the grid and counters but keeps the high score.
///
/// # Example
///
/// ```
/// use quadris_engine::Board;
///
/// let mut board = Board::new();
/// board.start();
/// assert!(board.status().is_running());
///
/// board.move_left();
/// board.rotate_cw();
/// board.hard_drop();
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Option<Piece>,
    next_kind: Option<ShapeKind>,
    queue: PieceQueue,
    stats: MatchStats,
    high_score: u32,
    status: MatchStatus,
    ghost_enabled: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with a random piece sequence, ready for
    /// [`Board::start`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_queue(PieceQueue::new())
    }

    /// Like [`Self::new`], but with a seeded piece sequence for reproducible
    /// matches.
    #[must_use]
    pub fn with_seed(seed: QueueSeed) -> Self {
        Self::with_queue(PieceQueue::with_seed(seed))
    }

    fn with_queue(queue: PieceQueue) -> Self {
        Self {
            grid: Grid::EMPTY,
            current: None,
            next_kind: None,
            queue,
            stats: MatchStats::new(),
            high_score: 0,
            status: MatchStatus::NotStarted,
            ghost_enabled: true,
        }
    }

    // --- query surface -----------------------------------------------------

    #[must_use]
    pub fn status(&self) -> &MatchStatus {
        &self.status
    }

    /// The settled playing matrix. Live piece cells are not in here; read
    /// them from [`Board::current_piece`].
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The piece in play. `None` only before the first [`Board::start`].
    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Kind of the piece that spawns after the current one locks.
    #[must_use]
    pub fn next_kind(&self) -> Option<ShapeKind> {
        self.next_kind
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.stats.level()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.stats.lines_cleared()
    }

    /// Highest score reached by any match this process, this one included.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Snapshot for the persistence collaborator, read when the match ends.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        self.stats.summary()
    }

    #[must_use]
    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    /// Where the current piece would land on a hard drop, for outline
    /// rendering. Derived on demand from the live piece and the grid — never
    /// stored, so it cannot go stale. `None` while the preview is toggled
    /// off or no piece is in play.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        if !self.ghost_enabled {
            return None;
        }
        self.current.map(|piece| self.landing_position(piece))
    }

    /// Interval the external tick source should wait between gravity ticks
    /// at the current level. Re-read after every level change.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        scoring::fall_interval(self.level())
    }

    // --- command surface ---------------------------------------------------

    /// Begins a match: fresh grid and counters (the high score carries
    /// over), a new current piece at the spawn anchor, and a new lookahead.
    ///
    /// Valid from [`MatchStatus::NotStarted`] and [`MatchStatus::GameOver`];
    /// a no-op while a match is running or paused.
    pub fn start(&mut self) {
        if !(self.status.is_not_started() || self.status.is_game_over()) {
            return;
        }
        self.grid = Grid::EMPTY;
        self.stats = MatchStats::new();
        self.status = MatchStatus::Running;
        if self.spawn_from_queue().is_err() {
            // Cannot happen on a fresh grid, but spawning goes through the
            // same overlap check as every later spawn.
            self.status = MatchStatus::GameOver;
        }
    }

    /// Moves the current piece one cell left, if the target cells are free.
    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    /// Moves the current piece one cell right, if the target cells are free.
    pub fn move_right(&mut self) {
        self.shift(1);
    }

    /// Turns the current piece a quarter turn clockwise, keeping the prior
    /// orientation if the turned cells collide.
    pub fn rotate_cw(&mut self) {
        self.rotate(Spin::Cw);
    }

    /// Turns the current piece a quarter turn counterclockwise, keeping the
    /// prior orientation if the turned cells collide.
    pub fn rotate_ccw(&mut self) {
        self.rotate(Spin::Ccw);
    }

    /// Advances gravity by one step: the piece falls one cell, or locks if
    /// it cannot.
    ///
    /// Called by the external tick source at the [`Board::fall_interval`]
    /// cadence.
    pub fn tick(&mut self) {
        self.descend(0);
    }

    /// Player-initiated descent by one cell; identical to [`Board::tick`]
    /// except that each cell fallen earns a small bonus.
    pub fn soft_drop(&mut self) {
        self.descend(scoring::SOFT_DROP_POINTS_PER_CELL);
    }

    /// Drops the current piece straight to its landing position and locks it
    /// there, earning a bonus per cell fallen.
    ///
    /// Always ends in a lock; the match keeps running unless the follow-up
    /// spawn tops out.
    pub fn hard_drop(&mut self) {
        if !self.status.is_running() {
            return;
        }
        let Some(piece) = self.current else { return };
        let landing = self.landing_position(piece);
        let fallen = landing.anchor().1 - piece.anchor().1;
        if fallen > 0 {
            self.stats
                .add_drop_bonus(u32::from(fallen.unsigned_abs()) * scoring::HARD_DROP_POINTS_PER_CELL);
        }
        self.current = Some(landing);
        self.lock_current();
    }

    /// Toggles between running and paused. While paused every other gameplay
    /// command is a no-op; from any other state this command is one too.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            MatchStatus::Running => MatchStatus::Paused,
            MatchStatus::Paused => MatchStatus::Running,
            MatchStatus::NotStarted => MatchStatus::NotStarted,
            MatchStatus::GameOver => MatchStatus::GameOver,
        };
    }

    /// Toggles the ghost-piece preview; valid in any state.
    pub fn toggle_ghost(&mut self) {
        self.ghost_enabled = !self.ghost_enabled;
    }

    // --- internals ---------------------------------------------------------

    fn shift(&mut self, dx: i16) {
        if !self.status.is_running() {
            return;
        }
        let Some(piece) = self.current else { return };
        let _ = self.try_replace(piece.translated(dx, 0));
    }

    fn rotate(&mut self, spin: Spin) {
        if !self.status.is_running() {
            return;
        }
        let Some(piece) = self.current else { return };
        // No kick search: a colliding candidate is simply discarded.
        let _ = self.try_replace(piece.rotated(spin));
    }

    fn descend(&mut self, bonus_per_cell: u32) {
        if !self.status.is_running() {
            return;
        }
        let Some(piece) = self.current else { return };
        match self.try_replace(piece.translated(0, 1)) {
            Ok(()) => {
                if bonus_per_cell > 0 {
                    self.stats.add_drop_bonus(bonus_per_cell);
                    self.fold_high_score();
                }
            }
            Err(PieceCollisionError) => self.lock_current(),
        }
    }

    /// Adopts the candidate piece if its cells are free, otherwise leaves
    /// the current piece untouched.
    fn try_replace(&mut self, candidate: Piece) -> Result<(), PieceCollisionError> {
        if !self.grid.fits(candidate.cells()) {
            return Err(PieceCollisionError);
        }
        self.current = Some(candidate);
        Ok(())
    }

    /// The lowest position the piece can occupy in its current column and
    /// orientation; shared by hard drop and the ghost query.
    fn landing_position(&self, piece: Piece) -> Piece {
        let mut landed = piece;
        loop {
            let next = landed.translated(0, 1);
            if !self.grid.fits(next.cells()) {
                return landed;
            }
            landed = next;
        }
    }

    /// Settles the current piece into the grid, clears completed rows,
    /// updates counters and the high score, and spawns the next piece.
    fn lock_current(&mut self) {
        let Some(piece) = self.current else { return };
        self.grid.lock(piece.cells(), piece.kind());
        let cleared = self.grid.clear_completed_rows();
        self.stats.record_lock(cleared);
        self.fold_high_score();
        if self.spawn_from_queue().is_err() {
            self.status = MatchStatus::GameOver;
        }
    }

    /// Promotes the lookahead to the live piece and draws a new lookahead.
    ///
    /// On top-out the overlapping piece is kept in place for the final
    /// frame, and the caller moves the match to game over.
    fn spawn_from_queue(&mut self) -> Result<(), TopOutError> {
        let kind = match self.next_kind.take() {
            Some(kind) => kind,
            None => self.queue.draw(),
        };
        self.next_kind = Some(self.queue.draw());
        let piece = Piece::spawn(kind);
        let fits = self.grid.fits(piece.cells());
        self.current = Some(piece);
        if fits { Ok(()) } else { Err(TopOutError) }
    }

    fn fold_high_score(&mut self) {
        self.high_score = self.high_score.max(self.stats.score());
    }
}
