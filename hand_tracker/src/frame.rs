//! Packed 8-bit BGR video frames.
//!
//! Channel order follows the camera convention (blue, green, red), so frames
//! captured from a device can be wrapped without reshuffling bytes.

use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame has zero size ({width}x{height})")]
    Empty { width: usize, height: usize },

    #[error("expected {expected} bytes for a {width}x{height} BGR frame, got {actual}")]
    BadLength { width: usize, height: usize, expected: usize, actual: usize },
}

/// Axis-aligned rectangle in pixel coordinates.  `w` and `h` are inclusive
/// extents, so a single pixel is `w == h == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    /// Center point using integer halving: `(x + w/2, y + h/2)`.
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// A BGR image, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width:  usize,
    height: usize,
    data:   Vec<u8>,
}

impl Frame {
    /// A frame filled with one color.
    pub fn filled(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&bgr);
        }
        Frame { width, height, data }
    }

    /// Wrap an existing BGR buffer.
    pub fn from_bgr(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty { width, height });
        }
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(FrameError::BadLength { width, height, expected, actual: data.len() });
        }
        Ok(Frame { width, height, data })
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn as_bytes(&self) -> &[u8] { &self.data }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, bgr: [u8; 3]) {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) * 3;
            self.data[i..i + 3].copy_from_slice(&bgr);
        }
    }

    /// Copy into an OpenCV `CV_8UC3` matrix for the imgproc pipeline.
    pub fn to_mat(&self) -> opencv::Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(
            self.height as i32,
            self.width as i32,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(&self.data);
        Ok(mat)
    }

    /// Mirror left↔right in place.
    pub fn flip_horizontal(&mut self) {
        let row_len = self.width * 3;
        for row in self.data.chunks_exact_mut(row_len) {
            let (mut l, mut r) = (0usize, self.width - 1);
            while l < r {
                for c in 0..3 {
                    row.swap(l * 3 + c, r * 3 + c);
                }
                l += 1;
                r -= 1;
            }
        }
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, bgr: [u8; 3]) {
        for y in rect.y..(rect.y + rect.h).min(self.height) {
            for x in rect.x..(rect.x + rect.w).min(self.width) {
                self.set_pixel(x, y, bgr);
            }
        }
    }

    /// Fill an axis-aligned ellipse centred at `(cx, cy)`, clipped to the frame.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, bgr: [u8; 3]) {
        if rx <= 0 || ry <= 0 { return; }
        let (rx2, ry2) = ((rx * rx) as i64, (ry * ry) as i64);
        for dy in -ry..=ry {
            let y = cy + dy;
            if y < 0 || y >= self.height as i32 { continue; }
            for dx in -rx..=rx {
                let x = cx + dx;
                if x < 0 || x >= self.width as i32 { continue; }
                if (dx as i64 * dx as i64) * ry2 + (dy as i64 * dy as i64) * rx2 <= rx2 * ry2 {
                    self.set_pixel(x as usize, y as usize, bgr);
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bgr_checks_length() {
        let err = Frame::from_bgr(2, 2, vec![0; 11]).unwrap_err();
        assert_eq!(err, FrameError::BadLength { width: 2, height: 2, expected: 12, actual: 11 });
        assert!(Frame::from_bgr(0, 4, vec![]).is_err());
        assert!(Frame::from_bgr(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn flip_mirrors_each_row() {
        let mut f = Frame::filled(3, 2, [0, 0, 0]);
        f.set_pixel(0, 0, [1, 2, 3]);
        f.set_pixel(1, 1, [9, 9, 9]);
        f.flip_horizontal();
        assert_eq!(f.pixel(2, 0), [1, 2, 3]);
        assert_eq!(f.pixel(0, 0), [0, 0, 0]);
        // middle column stays put on odd widths
        assert_eq!(f.pixel(1, 1), [9, 9, 9]);
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut f = Frame::filled(4, 4, [0, 0, 0]);
        f.fill_rect(Rect { x: 2, y: 2, w: 10, h: 10 }, [5, 5, 5]);
        assert_eq!(f.pixel(3, 3), [5, 5, 5]);
        assert_eq!(f.pixel(1, 1), [0, 0, 0]);
    }

    #[test]
    fn ellipse_covers_its_centre_only() {
        let mut f = Frame::filled(20, 20, [0, 0, 0]);
        f.fill_ellipse(10, 10, 3, 3, [7, 7, 7]);
        assert_eq!(f.pixel(10, 10), [7, 7, 7]);
        assert_eq!(f.pixel(13, 10), [7, 7, 7]);
        assert_eq!(f.pixel(13, 13), [0, 0, 0]);
    }

    #[test]
    fn mat_copy_keeps_layout() {
        let mut f = Frame::filled(4, 3, [1, 2, 3]);
        f.set_pixel(3, 2, [7, 8, 9]);
        let mat = f.to_mat().unwrap();
        assert_eq!((mat.cols(), mat.rows(), mat.channels()), (4, 3, 3));
        assert_eq!(mat.data_bytes().unwrap(), f.as_bytes());
    }

    #[test]
    fn rect_center_uses_integer_halves() {
        let r = Rect { x: 10, y: 20, w: 5, h: 4 };
        assert_eq!(r.center(), (12, 22));
    }
}
