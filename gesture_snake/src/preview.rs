//! Diagnostic camera preview.
//!
//! Shows the mirrored feed with the detected hand box, centre guide lines,
//! the current direction and a big arrow hint.  The overlay is drawn onto a
//! [`Canvas`] by [`draw_overlay`], which needs no window and is what the
//! tests exercise; [`PreviewWindow`] just puts that canvas on screen.

use minifb::{Key, KeyRepeat, MouseMode, ScaleMode, Window, WindowOptions};

use hand_tracker::{Detection, Direction, Frame};

use crate::canvas::{rgb, Canvas};
use crate::source::SimPointer;

pub const BOX_COLOR:     u32 = rgb(100, 255, 0);
pub const GUIDE_COLOR:   u32 = rgb(255, 150, 150);
pub const LABEL_COLOR:   u32 = rgb(255, 255, 255);
pub const ARROW_COLOR:   u32 = rgb(255, 180, 0);
const BOX_THICKNESS:     i32 = 3;
const LABEL_SCALE:       i32 = 6;
const ARROW_SCALE:       i32 = 8;

/// Paint the diagnostic overlay over a frame already blitted to `canvas`.
///
/// Nothing is drawn when no hand was detected.
pub fn draw_overlay(canvas: &mut Canvas, detection: Option<&Detection>, direction: Direction) {
    let Some(d) = detection else { return };
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);

    let b = d.bounds;
    canvas.draw_border(b.x as i32, b.y as i32, b.w as i32, b.h as i32, BOX_THICKNESS, BOX_COLOR);

    canvas.vline(w / 2, GUIDE_COLOR);
    canvas.hline(h / 2, GUIDE_COLOR);

    canvas.draw_text(&format!("MOVE: {}", direction), 40, 40, LABEL_SCALE, LABEL_COLOR);

    let (hint, x, y) = match direction {
        Direction::Left  => ("<- MOVE LEFT",  60,          h / 2),
        Direction::Right => ("MOVE RIGHT ->", w - 400,     h / 2),
        Direction::Up    => ("^ MOVE UP",     w / 2 - 150, 100),
        Direction::Down  => ("V MOVE DOWN",   w / 2 - 180, h - 80),
    };
    canvas.draw_text(hint, x, y - 5 * ARROW_SCALE / 2, ARROW_SCALE, ARROW_COLOR);
}

/// What the user did to the preview window since the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSignal {
    Continue,
    /// `Q` pressed: stop tracking, keep playing.
    QuitKey,
    /// Close button: the user wants the whole program gone.
    Closed,
}

pub struct PreviewOptions {
    pub title:   String,
    pub width:   usize,
    pub height:  usize,
    /// When set, the mouse position over the preview steers the simulator.
    pub pointer: Option<SimPointer>,
}

pub struct PreviewWindow {
    window:  Window,
    canvas:  Canvas,
    pointer: Option<SimPointer>,
}

impl PreviewWindow {
    pub fn open(opts: PreviewOptions) -> Result<Self, minifb::Error> {
        let window = Window::new(
            &opts.title,
            opts.width,
            opts.height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )?;
        Ok(PreviewWindow {
            window,
            canvas: Canvas::new(opts.width, opts.height),
            pointer: opts.pointer,
        })
    }

    /// Draw one annotated frame and report user input.
    pub fn show(
        &mut self,
        frame:     &Frame,
        detection: Option<&Detection>,
        direction: Direction,
    ) -> PreviewSignal {
        if !self.window.is_open() {
            return PreviewSignal::Closed;
        }

        self.canvas.blit_frame(frame);
        draw_overlay(&mut self.canvas, detection, direction);

        if let Err(e) = self.window.update_with_buffer(
            self.canvas.pixels(), self.canvas.width(), self.canvas.height(),
        ) {
            log::warn!("preview update failed: {}", e);
        }

        self.track_pointer();

        if !self.window.is_open() {
            PreviewSignal::Closed
        } else if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            PreviewSignal::QuitKey
        } else {
            PreviewSignal::Continue
        }
    }

    /// Map the mouse from window space to frame space for the simulator.
    fn track_pointer(&mut self) {
        let Some(pointer) = &self.pointer else { return };
        let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) else { return };
        let (ww, wh) = self.window.get_size();
        if ww == 0 || wh == 0 { return; }
        let x = mx * self.canvas.width()  as f32 / ww as f32;
        let y = my * self.canvas.height() as f32 / wh as f32;
        pointer.set(x as i32, y as i32);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
