//! # hand_tracker
//!
//! Coarse hand tracking from color video frames.  A skin-toned blob is
//! located in each frame and its position relative to the frame centre is
//! turned into one of four [`Direction`]s.
//!
//! Frames are plain BGR buffers; the image processing runs on OpenCV
//! (`imgproc`).  No camera, window or thread lives here, so the whole
//! pipeline can be exercised with synthetic frames.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_tracker::{Direction, Frame, HandDetector, Rect};
//!
//! let mut frame = Frame::filled(640, 480, [40, 40, 40]);
//! frame.fill_rect(Rect { x: 20, y: 190, w: 100, h: 100 }, [120, 160, 220]);
//!
//! let (dir, _) = HandDetector::default().update(&frame, Direction::Right).unwrap();
//! assert_eq!(dir, Direction::Left);
//! ```

pub mod blob;
pub mod color;
pub mod detect;
pub mod direction;
pub mod frame;

pub use blob::{external_blobs, largest, Blob};
pub use color::{skin_mask, HsvRange};
pub use detect::{infer_direction, Detection, HandDetector, DEFAULT_THRESHOLD};
pub use direction::{Direction, DirectionCell};
pub use frame::{Frame, FrameError, Rect};
