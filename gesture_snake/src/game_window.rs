//! The 800×600 game window.

use std::time::Duration;

use anyhow::{Context, Result};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use snake_sim::{Grid, SnakeState};

use crate::canvas::Canvas;
use crate::render::{draw_game_over, draw_playfield};

/// User input gathered since the last present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameInput {
    None,
    Restart,
    Quit,
    Closed,
}

pub struct GameWindow {
    window: Window,
    canvas: Canvas,
}

impl GameWindow {
    pub fn open(grid: &Grid) -> Result<Self> {
        let (w, h) = (grid.width as usize, grid.height as usize);
        let mut window = Window::new(
            "Gesture Snake",
            w, h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).context("creating the game window")?;

        // Ticks are paced by the game loop; this only caps the game-over poll.
        window.limit_update_rate(Some(Duration::from_millis(16)));

        Ok(GameWindow { window, canvas: Canvas::new(w, h) })
    }

    /// Keys only matter on the game-over screen, but a close is always seen.
    pub fn poll(&self) -> GameInput {
        if !self.window.is_open() {
            GameInput::Closed
        } else if self.window.is_key_pressed(Key::R, KeyRepeat::No) {
            GameInput::Restart
        } else if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            GameInput::Quit
        } else {
            GameInput::None
        }
    }

    pub fn show_playfield(&mut self, snake: &SnakeState, grid: &Grid) -> Result<()> {
        draw_playfield(&mut self.canvas, snake, grid);
        self.present()
    }

    pub fn show_game_over(&mut self, score: u32) -> Result<()> {
        draw_game_over(&mut self.canvas, score);
        self.present()
    }

    fn present(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(self.canvas.pixels(), self.canvas.width(), self.canvas.height())
            .context("presenting the game window")
    }
}
