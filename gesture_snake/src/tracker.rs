//! The gesture tracker thread.
//!
//! [`GestureTracker::start`] moves a [`FrameSource`] onto its own thread and
//! returns immediately.  Each loop iteration reads a frame, mirrors it, runs
//! the [`HandDetector`] and publishes the resulting direction through a
//! [`DirectionCell`].  The game thread reads that cell whenever it likes.
//!
//! Shutdown is cooperative: [`stop`](GestureTracker::stop) clears a flag the
//! loop checks once per frame.  A read that blocks forever is not
//! interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};

use hand_tracker::{Direction, DirectionCell, HandDetector};

use crate::preview::{PreviewOptions, PreviewSignal, PreviewWindow};
use crate::source::{FrameSource, SourceError};

#[derive(Debug, Default)]
struct Flags {
    running:        AtomicBool,
    preview_closed: AtomicBool,
}

/// Why the capture loop ended.
#[derive(Debug)]
enum Exit {
    Stopped,
    QuitKey,
    PreviewClosed,
    Source(SourceError),
}

/// Handle to the capture thread.  Dropping it stops and joins the thread.
pub struct GestureTracker {
    direction: DirectionCell,
    flags:     Arc<Flags>,
    handle:    Option<JoinHandle<()>>,
}

impl GestureTracker {
    /// Spawn the capture loop.  `preview` of `None` runs headless.
    pub fn start(source: Box<dyn FrameSource>, preview: Option<PreviewOptions>) -> Self {
        let direction = DirectionCell::new(Direction::Right);
        let flags = Arc::new(Flags::default());
        flags.running.store(true, Ordering::SeqCst);

        let cell = direction.clone();
        let shared = Arc::clone(&flags);
        let handle = thread::Builder::new()
            .name("gesture-tracker".into())
            .spawn(move || capture_loop(source, preview, cell, shared));

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                error!("could not spawn tracker thread: {}", e);
                flags.running.store(false, Ordering::SeqCst);
                None
            }
        };

        GestureTracker { direction, flags, handle }
    }

    /// Last direction the tracker published.  Never blocks.
    pub fn latest_direction(&self) -> Direction {
        self.direction.load()
    }

    /// Ask the loop to finish after the current frame.  Idempotent.
    pub fn stop(&self) {
        self.flags.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.flags.running.load(Ordering::SeqCst)
    }

    /// True once the user closed the preview window.
    pub fn preview_closed(&self) -> bool {
        self.flags.preview_closed.load(Ordering::SeqCst)
    }

    /// Wait for the capture thread to exit.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("tracker thread panicked");
            }
        }
    }
}

impl Drop for GestureTracker {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// capture_loop: runs on the tracker thread
// ════════════════════════════════════════════════════════════════════════════

fn capture_loop(
    mut source: Box<dyn FrameSource>,
    preview:    Option<PreviewOptions>,
    direction:  DirectionCell,
    flags:      Arc<Flags>,
) {
    let name = source.describe();
    if let Err(e) = source.open() {
        error!("{}: open failed: {}", name, e);
        flags.running.store(false, Ordering::SeqCst);
        return;
    }
    info!("{}: opened", name);

    let mut window = preview.and_then(|opts| match PreviewWindow::open(opts) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("preview window unavailable, tracking headless: {}", e);
            None
        }
    });

    let detector = HandDetector::default();

    let exit = loop {
        if !flags.running.load(Ordering::SeqCst) {
            break Exit::Stopped;
        }

        let mut frame = match source.read() {
            Ok(f) => f,
            Err(e) => break Exit::Source(e),
        };
        frame.flip_horizontal();

        let current = direction.load();
        let (next, detection) = match detector.update(&frame, current) {
            Ok(r) => r,
            Err(e) => {
                warn!("{}: detection failed, frame skipped: {}", name, e);
                (current, None)
            }
        };
        if next != current {
            debug!("direction {} -> {}", current, next);
        }
        direction.store(next);

        if let Some(w) = window.as_mut() {
            match w.show(&frame, detection.as_ref(), next) {
                PreviewSignal::Continue      => {}
                PreviewSignal::QuitKey       => break Exit::QuitKey,
                PreviewSignal::Closed        => break Exit::PreviewClosed,
            }
        }
    };

    flags.running.store(false, Ordering::SeqCst);
    if matches!(exit, Exit::PreviewClosed) {
        flags.preview_closed.store(true, Ordering::SeqCst);
    }

    drop(window);
    drop(source);

    match exit {
        Exit::Source(SourceError::EndOfStream) => info!("{}: end of stream", name),
        Exit::Source(e)     => error!("{}: {}; tracking stopped, last direction kept", name, e),
        Exit::QuitKey       => info!("{}: quit key pressed in preview", name),
        Exit::PreviewClosed => info!("{}: preview window closed", name),
        Exit::Stopped       => info!("{}: stopped", name),
    }
    info!("{}: released", name);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use hand_tracker::{Frame, Rect};

    const SKIN: [u8; 3] = [120, 160, 220];
    const BACKDROP: [u8; 3] = [40, 40, 40];

    /// Plays back a fixed list of frames, then reports end of stream.
    struct Scripted {
        frames:  VecDeque<Frame>,
        dropped: Arc<AtomicBool>,
    }

    impl FrameSource for Scripted {
        fn describe(&self) -> String { "scripted".into() }
        fn open(&mut self) -> Result<(), SourceError> { Ok(()) }
        fn read(&mut self) -> Result<Frame, SourceError> {
            self.frames.pop_front().ok_or(SourceError::EndOfStream)
        }
    }

    impl Drop for Scripted {
        fn drop(&mut self) { self.dropped.store(true, Ordering::SeqCst); }
    }

    /// Blank frames forever, counting reads.
    struct Endless {
        reads: Arc<AtomicUsize>,
    }

    impl FrameSource for Endless {
        fn describe(&self) -> String { "endless".into() }
        fn open(&mut self) -> Result<(), SourceError> { Ok(()) }
        fn read(&mut self) -> Result<Frame, SourceError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            Ok(Frame::filled(64, 48, BACKDROP))
        }
    }

    struct Unplugged;

    impl FrameSource for Unplugged {
        fn describe(&self) -> String { "unplugged".into() }
        fn open(&mut self) -> Result<(), SourceError> {
            Err(SourceError::CameraOpen { index: 0 })
        }
        fn read(&mut self) -> Result<Frame, SourceError> { Err(SourceError::NotOpen) }
    }

    /// Raw (un-mirrored) 640×480 frame with a palm at `x`, `y`.
    fn raw_hand(x: usize, y: usize) -> Frame {
        let mut f = Frame::filled(640, 480, BACKDROP);
        f.fill_rect(Rect { x, y, w: 100, h: 100 }, SKIN);
        f
    }

    fn run_script(frames: Vec<Frame>) -> (GestureTracker, Arc<AtomicBool>) {
        let dropped = Arc::new(AtomicBool::new(false));
        let source = Scripted { frames: frames.into(), dropped: Arc::clone(&dropped) };
        let mut tracker = GestureTracker::start(Box::new(source), None);
        tracker.join();
        (tracker, dropped)
    }

    #[test]
    fn starts_heading_right() {
        let (tracker, _) = run_script(vec![]);
        assert_eq!(tracker.latest_direction(), Direction::Right);
    }

    #[test]
    fn frames_are_mirrored_before_analysis() {
        // palm on the raw right edge shows up on the user's left
        let (tracker, _) = run_script(vec![raw_hand(520, 190)]);
        assert_eq!(tracker.latest_direction(), Direction::Left);
    }

    #[test]
    fn last_confident_reading_wins() {
        let frames = vec![
            raw_hand(270, 10),            // top → Up
            Frame::filled(640, 480, BACKDROP), // nothing → keep Up
            raw_hand(275, 195),           // centre → keep Up
        ];
        let (tracker, _) = run_script(frames);
        assert_eq!(tracker.latest_direction(), Direction::Up);
    }

    #[test]
    fn end_of_stream_releases_the_source() {
        let (tracker, dropped) = run_script(vec![raw_hand(270, 370)]);
        assert_eq!(tracker.latest_direction(), Direction::Down);
        assert!(!tracker.is_running());
        assert!(dropped.load(Ordering::SeqCst));
        assert!(!tracker.preview_closed());
    }

    #[test]
    fn stop_ends_an_endless_source() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut tracker = GestureTracker::start(
            Box::new(Endless { reads: Arc::clone(&reads) }),
            None,
        );
        while reads.load(Ordering::SeqCst) < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(tracker.is_running());
        tracker.stop();
        tracker.stop();
        tracker.join();
        assert!(!tracker.is_running());
        assert_eq!(tracker.latest_direction(), Direction::Right);
    }

    #[test]
    fn open_failure_only_ends_the_tracker() {
        let mut tracker = GestureTracker::start(Box::new(Unplugged), None);
        tracker.join();
        assert!(!tracker.is_running());
        assert_eq!(tracker.latest_direction(), Direction::Right);
    }
}
