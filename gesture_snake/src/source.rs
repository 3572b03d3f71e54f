//! Frame sources: a real webcam or a mouse-driven simulated hand.
//!
//! The tracker only sees the [`FrameSource`] trait, so it does not care
//! whether frames come from a camera or from the simulator.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hand_tracker::{Frame, FrameError};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// SourceError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not open camera {index}")]
    CameraOpen { index: i32 },

    #[error("frame source read before it was opened")]
    NotOpen,

    #[error("camera returned no frame")]
    ReadFailed,

    #[error("unsupported pixel format: {channels} channels")]
    UnsupportedFormat { channels: i32 },

    #[error("frame source exhausted")]
    EndOfStream,

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[cfg(feature = "camera")]
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver BGR frames to the tracker thread.
///
/// `open` is called once on the tracker thread before the first `read`.
/// The source is dropped when the loop exits, which must release any device.
pub trait FrameSource: Send + 'static {
    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    fn open(&mut self) -> Result<(), SourceError>;

    /// Block until the next frame is available.
    fn read(&mut self) -> Result<Frame, SourceError>;
}

// ════════════════════════════════════════════════════════════════════════════
// SimPointer + SimulatedHand
// ════════════════════════════════════════════════════════════════════════════

/// Where the simulated hand should appear, in displayed (mirrored) frame
/// coordinates.  Written by the preview window, read by the simulator.
#[derive(Clone, Debug)]
pub struct SimPointer {
    x: Arc<AtomicI32>,
    y: Arc<AtomicI32>,
}

impl SimPointer {
    pub fn new(x: i32, y: i32) -> Self {
        SimPointer { x: Arc::new(AtomicI32::new(x)), y: Arc::new(AtomicI32::new(y)) }
    }

    pub fn set(&self, x: i32, y: i32) {
        self.x.store(x, Ordering::Relaxed);
        self.y.store(y, Ordering::Relaxed);
    }

    pub fn get(&self) -> (i32, i32) {
        (self.x.load(Ordering::Relaxed), self.y.load(Ordering::Relaxed))
    }
}

/// Synthesised camera: a skin-toned palm on a dark backdrop.
pub struct SimulatedHand {
    width:   usize,
    height:  usize,
    pointer: SimPointer,
    period:  Duration,
    last:    Option<Instant>,
}

/// BGR of the synthetic palm; lands at H≈12 S≈116 V=220, inside the skin band.
const SIM_SKIN:     [u8; 3] = [120, 160, 220];
const SIM_BACKDROP: [u8; 3] = [45, 38, 32];
const SIM_PALM_RX:  i32 = 90;
const SIM_PALM_RY:  i32 = 120;

impl SimulatedHand {
    pub fn new(width: usize, height: usize, pointer: SimPointer) -> Self {
        SimulatedHand {
            width,
            height,
            pointer,
            period: Duration::from_millis(33),
            last:   None,
        }
    }

    /// Override the frame pacing (`Duration::ZERO` for as-fast-as-possible).
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Render one frame with the palm under the pointer.
    ///
    /// The tracker mirrors every frame before analysis, so the palm is drawn
    /// at the mirrored x to end up under the pointer after the flip.
    pub fn render(&self) -> Frame {
        let (px, py) = self.pointer.get();
        let mut frame = Frame::filled(self.width, self.height, SIM_BACKDROP);
        let raw_x = self.width as i32 - 1 - px;
        frame.fill_ellipse(raw_x, py, SIM_PALM_RX, SIM_PALM_RY, SIM_SKIN);
        frame
    }
}

impl FrameSource for SimulatedHand {
    fn describe(&self) -> String {
        format!("simulated hand {}x{}", self.width, self.height)
    }

    fn open(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    fn read(&mut self) -> Result<Frame, SourceError> {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
        Ok(self.render())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource: real webcam (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

/// The default webcam via OpenCV `videoio`.
///
/// The requested resolution is a hint; frames arrive at whatever size the
/// device negotiates.
#[cfg(feature = "camera")]
pub struct CameraSource {
    index:   i32,
    width:   usize,
    height:  usize,
    capture: Option<opencv::videoio::VideoCapture>,
    mat:     opencv::core::Mat,
}

#[cfg(feature = "camera")]
impl CameraSource {
    pub fn new(index: i32, width: usize, height: usize) -> Self {
        CameraSource {
            index,
            width,
            height,
            capture: None,
            mat: opencv::core::Mat::default(),
        }
    }
}

#[cfg(feature = "camera")]
impl FrameSource for CameraSource {
    fn describe(&self) -> String {
        format!("camera {} (requested {}x{})", self.index, self.width, self.height)
    }

    fn open(&mut self) -> Result<(), SourceError> {
        use opencv::prelude::*;
        use opencv::videoio;

        let mut cap = videoio::VideoCapture::new(self.index, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(SourceError::CameraOpen { index: self.index });
        }
        cap.set(videoio::CAP_PROP_FRAME_WIDTH,  self.width  as f64)?;
        cap.set(videoio::CAP_PROP_FRAME_HEIGHT, self.height as f64)?;
        self.capture = Some(cap);
        Ok(())
    }

    fn read(&mut self) -> Result<Frame, SourceError> {
        use opencv::prelude::*;

        let cap = self.capture.as_mut().ok_or(SourceError::NotOpen)?;
        if !cap.read(&mut self.mat)? || self.mat.empty() {
            return Err(SourceError::ReadFailed);
        }
        let channels = self.mat.channels();
        if channels != 3 {
            return Err(SourceError::UnsupportedFormat { channels });
        }

        let (w, h) = (self.mat.cols() as usize, self.mat.rows() as usize);
        let bytes = if self.mat.is_continuous() {
            self.mat.data_bytes()?.to_vec()
        } else {
            self.mat.try_clone()?.data_bytes()?.to_vec()
        };
        Ok(Frame::from_bgr(w, h, bytes)?)
    }
}

#[cfg(feature = "camera")]
impl Drop for CameraSource {
    fn drop(&mut self) {
        use opencv::prelude::*;
        if let Some(mut cap) = self.capture.take() {
            if let Err(e) = cap.release() {
                log::warn!("releasing camera {} failed: {}", self.index, e);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
