//! # gesture_snake
//!
//! Snake steered by hand position in front of a webcam.  A background
//! tracker thread segments skin-colored pixels, finds the hand and turns its
//! offset from the frame centre into a direction; the game window reads that
//! direction once per tick.
//!
//! ## Hand position → Direction
//!
//! | Hand offset from centre | Direction |
//! |---|---|
//! | more than 80 px left / right, mostly horizontal | `LEFT` / `RIGHT` |
//! | more than 80 px up / down, at least as vertical | `UP` / `DOWN` |
//! | within 80 px on both axes, or no hand | unchanged |
//!
//! The preview is mirrored, so moving your hand to your left steers left.
//! The snake never reverses onto itself: an opposite direction is ignored.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: a synthetic palm follows the mouse over
//!   the preview window.
//! * `camera`: **Hardware mode**: reads a real webcam through OpenCV.
//!
//! ### Keys
//!
//! | Window | Key | Action |
//! |---|---|---|
//! | Game, after game over | `R` | Restart |
//! | Game, after game over | `Q` | Quit |
//! | Game | close button | Quit |
//! | Preview | `Q` | Stop tracking (the snake keeps its last direction) |
//! | Preview | close button | Quit |

pub mod canvas;
pub mod source;
pub mod preview;
pub mod tracker;
pub mod render;
pub mod game_window;
pub mod app;
