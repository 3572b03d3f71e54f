//! # snake_sim
//!
//! Discrete-time Snake on a fixed 800×600 field of 20 px cells.
//!
//! * Movement is one cell per tick along the committed direction.
//! * Edges wrap around (toroidal field): leaving one side re-enters on the
//!   opposite side.
//! * A proposed direction is ignored if it would reverse the snake in place.
//! * Eating grows the snake by one and scores a point; running into the body
//!   ends the game.
//!
//! ```rust
//! use hand_tracker::Direction;
//! use rand::{rngs::StdRng, SeedableRng};
//! use snake_sim::{Grid, Phase, Session};
//!
//! let mut session = Session::new(Grid::default(), StdRng::seed_from_u64(1));
//! session.tick(Direction::Up);
//! assert_eq!(session.phase(), Phase::Running);
//! assert_eq!(session.snake().direction(), Direction::Up);
//! ```

pub mod grid;
pub mod session;
pub mod snake;

pub use grid::{Cell, Grid, CELL, HEIGHT, WIDTH};
pub use session::{Phase, Session};
pub use snake::{reconcile, spawn_food, SnakeState, TickOutcome};
