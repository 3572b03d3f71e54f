//! Frame → hand detection → direction.
//!
//! [`HandDetector::detect`] runs the full per-frame pipeline on an already
//! mirrored frame:
//!
//! 1. HSV skin threshold ([`HsvRange::SKIN`])
//! 2. median smoothing (kernel 15)
//! 3. external contours, keep the one enclosing the largest area
//! 4. bounding-box centre and its offset from the frame centre
//! 5. dominant-axis direction with an 80 px dead zone

use crate::blob::{external_blobs, largest};
use crate::color::{skin_mask, HsvRange};
use crate::direction::Direction;
use crate::frame::{Frame, Rect};

/// Offsets at or below this magnitude (pixels) never change direction.
pub const DEFAULT_THRESHOLD: i32 = 80;

/// Median filter kernel applied to the skin mask.
pub const DEFAULT_MEDIAN_KSIZE: i32 = 15;

/// Result of analysing one frame in which a skin contour was found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub bounds: Rect,
    pub area:   f64,
    /// Bounding-box centre.
    pub center: (i32, i32),
    /// Centre minus frame centre; positive `dy` is below the middle.
    pub offset: (i32, i32),
    /// `None` when the offset is inside the dead zone.
    pub direction: Option<Direction>,
}

/// Pick a direction from an offset, or `None` if it is too small.
///
/// The axis with the strictly larger magnitude wins; ties go to the vertical
/// axis.  Only the winning axis is compared against `threshold`.
pub fn infer_direction(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx < -threshold {
            Some(Direction::Left)
        } else if dx > threshold {
            Some(Direction::Right)
        } else {
            None
        }
    } else if dy < -threshold {
        Some(Direction::Up)
    } else if dy > threshold {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Stateless skin-blob hand detector.
#[derive(Clone, Copy, Debug)]
pub struct HandDetector {
    pub range:        HsvRange,
    pub median_ksize: i32,
    pub threshold:    i32,
}

impl Default for HandDetector {
    fn default() -> Self {
        HandDetector {
            range:        HsvRange::SKIN,
            median_ksize: DEFAULT_MEDIAN_KSIZE,
            threshold:    DEFAULT_THRESHOLD,
        }
    }
}

impl HandDetector {
    /// Analyse one frame.  `Ok(None)` when no skin region survives
    /// smoothing.
    pub fn detect(&self, frame: &Frame) -> opencv::Result<Option<Detection>> {
        let mask = skin_mask(&frame.to_mat()?, &self.range, self.median_ksize)?;
        let blobs = external_blobs(&mask)?;
        let Some(hand) = largest(&blobs) else { return Ok(None) };

        let (cx, cy) = hand.bounds.center();
        let (cx, cy) = (cx as i32, cy as i32);
        let dx = cx - (frame.width()  / 2) as i32;
        let dy = cy - (frame.height() / 2) as i32;

        Ok(Some(Detection {
            bounds:    hand.bounds,
            area:      hand.area,
            center:    (cx, cy),
            offset:    (dx, dy),
            direction: infer_direction(dx, dy, self.threshold),
        }))
    }

    /// Run [`detect`](Self::detect) and fold the result into `current`:
    /// the direction only changes when a hand is found outside the dead zone.
    pub fn update(
        &self,
        frame:   &Frame,
        current: Direction,
    ) -> opencv::Result<(Direction, Option<Detection>)> {
        let detection = self.detect(frame)?;
        let next = detection.and_then(|d| d.direction).unwrap_or(current);
        Ok((next, detection))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN: [u8; 3] = [120, 160, 220];
    const BACKDROP: [u8; 3] = [40, 40, 40];

    /// 640×480 frame with a 100×100 skin square centred at `(cx, cy)`.
    fn frame_with_hand(cx: usize, cy: usize) -> Frame {
        let mut f = Frame::filled(640, 480, BACKDROP);
        f.fill_rect(Rect { x: cx - 50, y: cy - 50, w: 100, h: 100 }, SKIN);
        f
    }

    #[test]
    fn dominant_axis_and_threshold() {
        assert_eq!(infer_direction(-81, 0, 80), Some(Direction::Left));
        assert_eq!(infer_direction(81, 10, 80), Some(Direction::Right));
        assert_eq!(infer_direction(0, -81, 80), Some(Direction::Up));
        assert_eq!(infer_direction(5, 200, 80), Some(Direction::Down));
    }

    #[test]
    fn dead_zone_is_exclusive_of_threshold() {
        assert_eq!(infer_direction(80, 0, 80), None);
        assert_eq!(infer_direction(-80, 0, 80), None);
        assert_eq!(infer_direction(0, 80, 80), None);
        assert_eq!(infer_direction(0, 0, 80), None);
    }

    #[test]
    fn tie_goes_to_vertical_axis() {
        assert_eq!(infer_direction(100, 100, 80), Some(Direction::Down));
        assert_eq!(infer_direction(-100, -100, 80), Some(Direction::Up));
    }

    #[test]
    fn only_the_dominant_axis_is_checked() {
        // dx dominates but is inside the dead zone; the large-ish dy is ignored
        assert_eq!(infer_direction(79, 70, 80), None);
    }

    #[test]
    fn no_skin_means_no_detection() {
        let f = Frame::filled(320, 240, BACKDROP);
        assert_eq!(HandDetector::default().detect(&f).unwrap(), None);
    }

    #[test]
    fn hand_on_the_left_means_left() {
        let f = frame_with_hand(100, 240);
        let d = HandDetector::default().detect(&f).unwrap().expect("hand");
        assert_eq!(d.direction, Some(Direction::Left));
        assert!(d.offset.0 < -80);
    }

    #[test]
    fn hand_near_top_means_up() {
        let f = frame_with_hand(320, 80);
        let d = HandDetector::default().detect(&f).unwrap().expect("hand");
        assert_eq!(d.direction, Some(Direction::Up));
    }

    #[test]
    fn centred_hand_keeps_current_direction() {
        let f = frame_with_hand(330, 250);
        let det = HandDetector::default();
        let (dir, detection) = det.update(&f, Direction::Down).unwrap();
        assert!(detection.is_some());
        assert_eq!(dir, Direction::Down);
    }

    #[test]
    fn missing_hand_keeps_current_direction() {
        let f = Frame::filled(320, 240, BACKDROP);
        let (dir, detection) = HandDetector::default().update(&f, Direction::Left).unwrap();
        assert_eq!(dir, Direction::Left);
        assert!(detection.is_none());
    }

    #[test]
    fn largest_blob_is_taken_as_the_hand() {
        let mut f = Frame::filled(640, 480, BACKDROP);
        // small patch on the right, big patch at the bottom
        f.fill_rect(Rect { x: 560, y: 220, w: 40, h: 40 }, SKIN);
        f.fill_rect(Rect { x: 270, y: 360, w: 100, h: 100 }, SKIN);
        let d = HandDetector::default().detect(&f).unwrap().expect("hand");
        assert_eq!(d.direction, Some(Direction::Down));
    }

    #[test]
    fn hollow_hand_outline_beats_smaller_solid_patch() {
        let mut f = Frame::filled(1280, 720, BACKDROP);
        // 300×300 outline with 40 px walls on the left, solid 220×220 on the right
        f.fill_rect(Rect { x: 100, y: 210, w: 300, h: 300 }, SKIN);
        f.fill_rect(Rect { x: 140, y: 250, w: 220, h: 220 }, BACKDROP);
        f.fill_rect(Rect { x: 930, y: 250, w: 220, h: 220 }, SKIN);

        let d = HandDetector::default().detect(&f).unwrap().expect("hand");
        assert_eq!(d.bounds.x, 100);
        assert!(d.area > 220.0 * 220.0);
        assert_eq!(d.direction, Some(Direction::Left));
    }

    #[test]
    fn speckle_noise_is_ignored() {
        let mut f = Frame::filled(320, 240, BACKDROP);
        for i in 0..20 {
            f.set_pixel(10 + i * 13, 15 + i * 9, SKIN);
        }
        assert_eq!(HandDetector::default().detect(&f).unwrap(), None);
    }
}
