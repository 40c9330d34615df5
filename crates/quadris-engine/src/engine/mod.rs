//! Game engine logic and state management.
//!
//! This module provides the high-level logic that orchestrates the core data
//! structures into a playable match:
//!
//! - [`Board`] - The aggregate root: grid, live piece, counters, and the
//!   match state machine, driven through its command surface
//! - [`MatchStats`] - Per-match counters (score, level, lines cleared)
//! - [`PieceQueue`] - Seeded source of upcoming piece kinds
//! - [`QueueSeed`] - Seed for deterministic piece generation
//!
//! # Game flow
//!
//! 1. Construct a [`Board`] (optionally with a [`QueueSeed`])
//! 2. Call [`Board::start`] to begin a match
//! 3. The external tick source calls [`Board::tick`] at the cadence given by
//!    [`Board::fall_interval`]; input dispatch calls the movement, rotation,
//!    and drop commands
//! 4. The renderer polls the query surface after every command
//! 5. A piece spawning onto settled cells ends the match; [`Board::start`]
//!    begins the next one, carrying the high score forward
//!
//! Commands arriving in the wrong state are silent no-ops; the engine never
//! panics on any command in any state.

pub use self::{board::*, match_stats::*, piece_queue::*, scoring::*};

mod board;
mod match_stats;
mod piece_queue;
mod scoring;
