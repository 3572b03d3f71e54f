//! Game session state machine.
//!
//! ```text
//!            self-collision            R
//!  RUNNING ─────────────────▶ GAME_OVER ──▶ RUNNING (fresh SnakeState)
//!     │                          │
//!     └──── quit ──▶ TERMINATED ◀┘ quit
//! ```
//!
//! Restarting replaces the [`SnakeState`] in place; nothing recurses.

use hand_tracker::Direction;
use rand::Rng;

use crate::grid::Grid;
use crate::snake::{SnakeState, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
    Terminated,
}

pub struct Session<R: Rng> {
    grid:  Grid,
    rng:   R,
    phase: Phase,
    snake: SnakeState,
    games: u32,
}

impl<R: Rng> Session<R> {
    /// Start in `Running` with a fresh snake.
    pub fn new(grid: Grid, mut rng: R) -> Self {
        let snake = SnakeState::new(&grid, &mut rng);
        Session { grid, rng, phase: Phase::Running, snake, games: 1 }
    }

    /// Start in `Running` from an existing snake, e.g. a saved position.
    pub fn from_state(grid: Grid, rng: R, snake: SnakeState) -> Self {
        Session { grid, rng, phase: Phase::Running, snake, games: 1 }
    }

    pub fn phase(&self) -> Phase       { self.phase }
    pub fn snake(&self) -> &SnakeState { &self.snake }
    pub fn grid(&self)  -> &Grid       { &self.grid }

    /// Number of games started in this session, including the current one.
    pub fn games(&self) -> u32 { self.games }

    /// Advance one tick.  Only has an effect while `Running`; a collision
    /// moves the session to `GameOver`.
    pub fn tick(&mut self, proposed: Direction) -> Option<TickOutcome> {
        if self.phase != Phase::Running {
            return None;
        }
        let outcome = self.snake.tick(proposed, &self.grid, &mut self.rng);
        if outcome == TickOutcome::Collided {
            self.phase = Phase::GameOver;
        }
        Some(outcome)
    }

    /// `GameOver → Running` with a brand-new snake.  Returns false (and does
    /// nothing) in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.snake = SnakeState::new(&self.grid, &mut self.rng);
        self.phase = Phase::Running;
        self.games += 1;
        true
    }

    /// Any phase → `Terminated`.
    pub fn quit(&mut self) {
        self.phase = Phase::Terminated;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
