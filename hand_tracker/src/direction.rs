//! The four cardinal directions and a lock-free latest-value cell for them.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

// ════════════════════════════════════════════════════════════════════════════
// Direction
// ════════════════════════════════════════════════════════════════════════════

/// A coarse movement direction, shared by the tracker output and the snake.
///
/// Screen coordinates: `y` grows downward, so `Up` is a negative `dy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up    = 0,
    Down  = 1,
    Left  = 2,
    #[default]
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up, Direction::Down, Direction::Left, Direction::Right,
    ];

    /// The 180° reversal of this direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up    => Direction::Down,
            Direction::Down  => Direction::Up,
            Direction::Left  => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset `(dx, dy)` in grid steps.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up    => ( 0, -1),
            Direction::Down  => ( 0,  1),
            Direction::Left  => (-1,  0),
            Direction::Right => ( 1,  0),
        }
    }

    /// Upper-case display name.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up    => "UP",
            Direction::Down  => "DOWN",
            Direction::Left  => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    fn from_u8(v: u8) -> Direction {
        match v {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DirectionCell: single-slot, overwrite-on-write
// ════════════════════════════════════════════════════════════════════════════

/// Shared latest-value slot holding one [`Direction`].
///
/// One writer (the capture thread) overwrites it every processed frame; any
/// number of readers see the last fully written value.  Clones share the
/// same slot.
#[derive(Clone, Debug)]
pub struct DirectionCell {
    slot: Arc<AtomicU8>,
}

impl DirectionCell {
    pub fn new(initial: Direction) -> Self {
        DirectionCell { slot: Arc::new(AtomicU8::new(initial as u8)) }
    }

    pub fn load(&self) -> Direction {
        Direction::from_u8(self.slot.load(Ordering::Acquire))
    }

    pub fn store(&self, d: Direction) {
        self.slot.store(d as u8, Ordering::Release);
    }
}

impl Default for DirectionCell {
    fn default() -> Self { DirectionCell::new(Direction::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
