//! Game screens drawn onto a [`Canvas`].
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ SCORE: 3                                 │
//! │ DIRECTION: LEFT            ▓             │  ▓ food
//! │                                          │
//! │            ████████                      │  head → tail fades green
//! │                   █                      │
//! └──────────────────────────────────────────┘
//! ```

use snake_sim::{Grid, SnakeState};

use crate::canvas::{blend, rgb, text_width, Canvas};

pub const BG_TOP:         u32 = rgb(40, 60, 180);
pub const BG_BOTTOM:      u32 = rgb(20, 20, 70);
pub const FOOD_COLOR:     u32 = rgb(255, 80, 80);
pub const TEXT_COLOR:     u32 = rgb(255, 255, 255);
pub const DIR_TEXT_COLOR: u32 = rgb(200, 200, 255);
pub const OVER_BG:        u32 = rgb(20, 20, 50);
pub const OVER_TITLE:     u32 = rgb(255, 80, 80);
pub const OVER_PROMPT:    u32 = rgb(200, 200, 200);

const SEGMENT_RADIUS: i32 = 5;
const FOOD_RADIUS:    i32 = 6;
const HUD_SCALE:      i32 = 5;

/// Segment `i` (0 = head) fades from bright green toward `(50, 0, 100)`.
pub fn segment_color(i: usize) -> u32 {
    let shade = 255usize.saturating_sub(i * 5) as u8;
    rgb(50, shade, 100)
}

/// Background color of row `y` on a `height`-tall vertical gradient.
pub fn gradient_row(y: usize, height: usize) -> u32 {
    blend(BG_TOP, BG_BOTTOM, y as f32 / height.max(1) as f32)
}

/// One tick of the running game.
pub fn draw_playfield(canvas: &mut Canvas, snake: &SnakeState, grid: &Grid) {
    let (w, h) = (canvas.width(), canvas.height());
    for y in 0..h {
        canvas.fill_rect(0, y as i32, w as i32, 1, gradient_row(y, h));
    }

    for (i, seg) in snake.body().iter().enumerate() {
        canvas.fill_rounded_rect(seg.x, seg.y, grid.cell, grid.cell, SEGMENT_RADIUS, segment_color(i));
    }

    let food = snake.food();
    canvas.fill_rounded_rect(food.x, food.y, grid.cell, grid.cell, FOOD_RADIUS, FOOD_COLOR);

    canvas.draw_text(&format!("SCORE: {}", snake.score()), 20, 20, HUD_SCALE, TEXT_COLOR);
    canvas.draw_text(
        &format!("DIRECTION: {}", snake.direction()),
        20, 60, HUD_SCALE, DIR_TEXT_COLOR,
    );
}

/// Terminal screen with the restart prompt.
pub fn draw_game_over(canvas: &mut Canvas, score: u32) {
    canvas.fill(OVER_BG);
    let cx = canvas.width() as i32 / 2;
    let cy = canvas.height() as i32 / 2;

    let centered = |text: &str, scale: i32| cx - text_width(text, scale) / 2;

    let title = "GAME OVER";
    canvas.draw_text(title, centered(title, 8), cy - 60, 8, OVER_TITLE);

    let result = format!("SCORE: {}", score);
    canvas.draw_text(&result, centered(&result, 4), cy, 4, TEXT_COLOR);

    let prompt = "PRESS R TO RESTART OR Q TO QUIT";
    canvas.draw_text(prompt, centered(prompt, 4), cy + 40, 4, OVER_PROMPT);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_tracker::Direction;
    use snake_sim::Cell;

    fn canvas() -> Canvas {
        Canvas::new(800, 600)
    }

    #[test]
    fn segment_gradient_bottoms_out() {
        assert_eq!(segment_color(0), rgb(50, 255, 100));
        assert_eq!(segment_color(10), rgb(50, 205, 100));
        assert_eq!(segment_color(51), rgb(50, 0, 100));
        assert_eq!(segment_color(500), rgb(50, 0, 100));
    }

    #[test]
    fn background_runs_top_to_bottom() {
        assert_eq!(gradient_row(0, 600), BG_TOP);
        let near_bottom = gradient_row(599, 600);
        assert_ne!(near_bottom, BG_TOP);
        assert_eq!(blend(near_bottom, BG_BOTTOM, 1.0), BG_BOTTOM);
    }

    #[test]
    fn playfield_shows_snake_and_food() {
        let grid = Grid::default();
        let snake = SnakeState::from_parts(
            [Cell::new(400, 300), Cell::new(380, 300)],
            Direction::Right,
            Cell::new(600, 400),
        );
        let mut c = canvas();
        draw_playfield(&mut c, &snake, &grid);

        assert_eq!(c.pixel(410, 310), segment_color(0));
        assert_eq!(c.pixel(390, 310), segment_color(1));
        assert_eq!(c.pixel(610, 410), FOOD_COLOR);
        // rounded corner shows background through
        assert_ne!(c.pixel(600, 400), FOOD_COLOR);
    }

    #[test]
    fn hud_text_is_drawn_top_left() {
        let grid = Grid::default();
        let snake = SnakeState::from_parts([Cell::new(400, 300)], Direction::Up, Cell::new(0, 580));
        let mut c = canvas();
        draw_playfield(&mut c, &snake, &grid);

        let has = |color: u32, y0: usize| {
            (20..200).any(|x| (y0..y0 + 25).any(|y| c.pixel(x, y) == color))
        };
        assert!(has(TEXT_COLOR, 20));
        assert!(has(DIR_TEXT_COLOR, 60));
    }

    #[test]
    fn game_over_screen_has_title_and_prompt() {
        let mut c = canvas();
        draw_game_over(&mut c, 7);
        assert_eq!(c.pixel(5, 5), OVER_BG);
        assert!(c.pixels().iter().any(|&p| p == OVER_TITLE));
        assert!(c.pixels().iter().any(|&p| p == OVER_PROMPT));
    }
}
