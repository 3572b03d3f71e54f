//! Top-level application: tracker thread + game state machine.
//!
//! `run` starts the [`GestureTracker`], opens the game window and drives a
//! [`Session`] through RUNNING / GAME_OVER / TERMINATED.  Every way out of
//! the loop stops the tracker before returning so the camera is released.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use snake_sim::{Grid, Phase, Session, TickOutcome};

use crate::game_window::{GameInput, GameWindow};
use crate::preview::PreviewOptions;
use crate::source::{FrameSource, SimPointer, SimulatedHand};
use crate::tracker::GestureTracker;

/// Simulation ticks per second.
pub const TICK_RATE_HZ: u32 = 10;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Runtime settings.  Field size, tick rate and detection thresholds are
/// fixed and deliberately not part of this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Camera device index (only used with the `camera` feature).
    pub camera_index:   i32,
    /// Show the annotated camera preview.
    pub preview:        bool,
    /// Use the simulated hand even when a camera is available.
    pub simulate:       bool,
    /// Requested capture size; the camera may deliver something else.
    pub capture_width:  usize,
    pub capture_height: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            camera_index:   0,
            preview:        true,
            simulate:       false,
            capture_width:  1280,
            capture_height: 720,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TickClock
// ════════════════════════════════════════════════════════════════════════════

/// Caps a loop at a fixed rate by sleeping off whatever is left of the
/// period since the previous `wait`.  Slow iterations are not made up.
pub struct TickClock {
    period: Duration,
    last:   Option<Instant>,
}

impl TickClock {
    pub fn new(hz: u32) -> Self {
        TickClock { period: Duration::from_secs(1) / hz.max(1), last: None }
    }

    pub fn period(&self) -> Duration { self.period }

    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }

    /// Forget the previous tick, e.g. after sitting on the game-over screen.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It starts the tracker
/// (simulated hand by default, webcam with `--features camera`), opens the
/// game window and plays until the user quits.
pub fn run(cfg: AppConfig) -> Result<()> {
    let pointer = SimPointer::new(cfg.capture_width as i32 / 2, cfg.capture_height as i32 / 2);
    let source = frame_source(&cfg, &pointer);

    if !cfg.preview && source.describe().starts_with("simulated") {
        warn!("simulated hand without a preview window cannot be moved");
    }

    let preview = cfg.preview.then(|| PreviewOptions {
        title:   "Hand Control (press Q to stop tracking)".to_string(),
        width:   cfg.capture_width,
        height:  cfg.capture_height,
        pointer: Some(pointer.clone()),
    });

    let mut tracker = GestureTracker::start(source, preview);
    let result = play(&tracker);

    tracker.stop();
    tracker.join();
    result
}

fn frame_source(cfg: &AppConfig, pointer: &SimPointer) -> Box<dyn FrameSource> {
    if !cfg.simulate {
        #[cfg(feature = "camera")]
        return Box::new(crate::source::CameraSource::new(
            cfg.camera_index, cfg.capture_width, cfg.capture_height,
        ));

        #[cfg(not(feature = "camera"))]
        info!("built without the `camera` feature; using the simulated hand");
    }

    Box::new(SimulatedHand::new(cfg.capture_width, cfg.capture_height, pointer.clone()))
}

/// The game state machine.  Returns when the session terminates.
fn play(tracker: &GestureTracker) -> Result<()> {
    let grid = Grid::default();
    let mut window = GameWindow::open(&grid)?;
    let mut session = Session::new(grid, StdRng::from_entropy());
    let mut clock = TickClock::new(TICK_RATE_HZ);

    info!("game {} started", session.games());

    loop {
        match session.phase() {
            Phase::Running => {
                if window.poll() == GameInput::Closed || tracker.preview_closed() {
                    session.quit();
                    continue;
                }

                match session.tick(tracker.latest_direction()) {
                    Some(TickOutcome::Ate) => {
                        debug!("ate food, score {}", session.snake().score());
                    }
                    Some(TickOutcome::Collided) => {
                        info!(
                            "game {} over: score {}, length {}",
                            session.games(),
                            session.snake().score(),
                            session.snake().len(),
                        );
                    }
                    _ => {}
                }

                window.show_playfield(session.snake(), session.grid())?;
                clock.wait();
            }

            Phase::GameOver => {
                if game_over_input(&mut session, window.poll(), tracker.preview_closed()) {
                    window.show_game_over(session.snake().score())?;
                } else if session.phase() == Phase::Running {
                    clock.reset();
                    info!("game {} started", session.games());
                }
            }

            Phase::Terminated => {
                info!("quitting after {} game(s)", session.games());
                return Ok(());
            }
        }
    }
}

/// Apply one poll of the game-over screen to `session`.  Returns true when
/// the session is still waiting and the screen should be drawn again.
fn game_over_input<R: Rng>(session: &mut Session<R>, input: GameInput, preview_closed: bool) -> bool {
    if preview_closed {
        session.quit();
        return false;
    }
    match input {
        GameInput::Restart => {
            session.restart();
            false
        }
        GameInput::Quit | GameInput::Closed => {
            session.quit();
            false
        }
        GameInput::None => true,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
