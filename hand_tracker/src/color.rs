//! Skin segmentation: BGR → HSV, range threshold, median smoothing.
//!
//! HSV values use OpenCV's 8-bit convention: hue is halved to fit a byte
//! (`0..=180`), saturation and value span `0..=255`.

use opencv::core::{self, Mat, Scalar};
use opencv::imgproc;

/// Inclusive per-channel HSV bounds, `[h, s, v]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Fixed skin-tone band: hue 0–20, saturation 30–150, value 60–255.
    pub const SKIN: HsvRange = HsvRange {
        lower: [0, 30, 60],
        upper: [20, 150, 255],
    };

    fn scalar([h, s, v]: [u8; 3]) -> Scalar {
        Scalar::new(h as f64, s as f64, v as f64, 0.0)
    }
}

/// Binary (`0`/`255`) mask of the pixels of a BGR `frame` inside `range`,
/// median-filtered with an odd kernel `ksize`.  A `ksize` below 3 skips
/// the smoothing.
pub fn skin_mask(frame: &Mat, range: &HsvRange, ksize: i32) -> opencv::Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color_def(frame, &mut hsv, imgproc::COLOR_BGR2HSV)?;

    let mut mask = Mat::default();
    core::in_range(
        &hsv,
        &HsvRange::scalar(range.lower),
        &HsvRange::scalar(range.upper),
        &mut mask,
    )?;

    if ksize < 3 {
        return Ok(mask);
    }
    let mut smooth = Mat::default();
    imgproc::median_blur(&mask, &mut smooth, ksize)?;
    Ok(smooth)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Frame, Rect};
    use opencv::prelude::*;

    const SKIN: [u8; 3] = [120, 160, 220];

    fn mask_at(mask: &Mat, x: i32, y: i32) -> u8 {
        *mask.at_2d::<u8>(y, x).unwrap()
    }

    fn single_pixel(bgr: [u8; 3]) -> bool {
        let f = Frame::filled(1, 1, bgr);
        let m = skin_mask(&f.to_mat().unwrap(), &HsvRange::SKIN, 0).unwrap();
        mask_at(&m, 0, 0) == 255
    }

    #[test]
    fn typical_skin_tone_is_inside_skin_band() {
        // B=120 G=160 R=220 → H≈12, S≈116, V=220
        assert!(single_pixel(SKIN));
    }

    #[test]
    fn dark_saturated_and_blue_pixels_are_rejected() {
        assert!(!single_pixel([30, 40, 50]));   // too dark
        assert!(!single_pixel([0, 0, 255]));    // too saturated
        assert!(!single_pixel([200, 120, 60])); // blue hue
        assert!(!single_pixel([128, 128, 128]));
    }

    #[test]
    fn isolated_speckles_are_smoothed_away() {
        let mut f = Frame::filled(60, 60, [40, 40, 40]);
        f.set_pixel(10, 10, SKIN);
        f.set_pixel(40, 33, SKIN);
        let m = skin_mask(&f.to_mat().unwrap(), &HsvRange::SKIN, 15).unwrap();
        assert_eq!(core::count_non_zero(&m).unwrap(), 0);
    }

    #[test]
    fn large_region_survives_smoothing() {
        let mut f = Frame::filled(80, 80, [40, 40, 40]);
        f.fill_rect(Rect { x: 20, y: 20, w: 40, h: 40 }, SKIN);
        let m = skin_mask(&f.to_mat().unwrap(), &HsvRange::SKIN, 15).unwrap();
        assert_eq!(mask_at(&m, 40, 40), 255);
        assert_eq!(mask_at(&m, 20, 40), 255); // edge midpoint keeps its majority
        assert_eq!(mask_at(&m, 5, 5), 0);
    }

    #[test]
    fn full_frame_stays_full_at_borders() {
        let f = Frame::filled(30, 20, SKIN);
        let m = skin_mask(&f.to_mat().unwrap(), &HsvRange::SKIN, 15).unwrap();
        assert_eq!(core::count_non_zero(&m).unwrap(), 30 * 20);
    }
}
