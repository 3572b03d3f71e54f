//! Snake state and the per-tick update.

use std::collections::{HashSet, VecDeque};

use hand_tracker::Direction;
use rand::Rng;

use crate::grid::{Cell, Grid};

// ════════════════════════════════════════════════════════════════════════════
// Reconciliation
// ════════════════════════════════════════════════════════════════════════════

/// Adopt `proposed` unless it would reverse `committed` by 180°.
pub fn reconcile(committed: Direction, proposed: Direction) -> Direction {
    if proposed == committed.opposite() { committed } else { proposed }
}

// ════════════════════════════════════════════════════════════════════════════
// Food
// ════════════════════════════════════════════════════════════════════════════

/// Uniformly random free cell.  Falls back to any cell when the body covers
/// the whole field.
pub fn spawn_food<'a, R, I>(grid: &Grid, body: I, rng: &mut R) -> Cell
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Cell>,
{
    let occupied: HashSet<Cell> = body.into_iter().copied().collect();
    let free: Vec<Cell> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    if free.is_empty() {
        grid.random_cell(rng)
    } else {
        free[rng.gen_range(0..free.len())]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SnakeState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one cell, length unchanged.
    Moved,
    /// Landed on food: grew by one and scored.
    Ate,
    /// Head ran into the body.
    Collided,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeState {
    /// Head first.  Never empty.
    body:      VecDeque<Cell>,
    direction: Direction,
    food:      Cell,
    score:     u32,
}

impl SnakeState {
    /// Fresh game: one segment at the field centre heading right, score 0.
    pub fn new<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        let head = grid.center();
        let food = spawn_food(grid, [&head], rng);
        SnakeState {
            body:      VecDeque::from([head]),
            direction: Direction::Right,
            food,
            score:     0,
        }
    }

    /// Build a state from explicit parts.  Panics on an empty body.
    pub fn from_parts<I>(body: I, direction: Direction, food: Cell) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let body: VecDeque<Cell> = body.into_iter().collect();
        assert!(!body.is_empty(), "snake body must have at least one segment");
        SnakeState { body, direction, food, score: 0 }
    }

    pub fn head(&self)      -> Cell      { self.body[0] }
    pub fn body(&self)      -> &VecDeque<Cell> { &self.body }
    pub fn len(&self)       -> usize     { self.body.len() }
    pub fn direction(&self) -> Direction { self.direction }
    pub fn food(&self)      -> Cell      { self.food }
    pub fn score(&self)     -> u32       { self.score }

    /// Advance one tick with the tracker's `proposed` direction.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        proposed: Direction,
        grid:     &Grid,
        rng:      &mut R,
    ) -> TickOutcome {
        self.direction = reconcile(self.direction, proposed);

        let head = grid.step(self.head(), self.direction);
        self.body.push_front(head);

        let ate = head == self.food;
        if ate {
            self.score += 1;
            self.food = spawn_food(grid, &self.body, rng);
        } else {
            self.body.pop_back();
        }

        if self.body.iter().skip(1).any(|&c| c == head) {
            TickOutcome::Collided
        } else if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
