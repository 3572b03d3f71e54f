//! External contours of a binary mask.
//!
//! Only outer boundaries are retrieved, so a region with holes in it is a
//! single blob whose area is everything its outline encloses.

use opencv::core::{Mat, Point, Vector};
use opencv::imgproc;

use crate::frame::Rect;

/// One external contour of the mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Polygon area enclosed by the outer boundary.
    pub area:   f64,
    pub bounds: Rect,
}

/// All external contours, in the order OpenCV returns them.
pub fn external_blobs(mask: &Mat) -> opencv::Result<Vec<Blob>> {
    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours_def(
        mask,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
    )?;

    contours
        .iter()
        .map(|contour| {
            let area = imgproc::contour_area_def(&contour)?;
            let r = imgproc::bounding_rect(&contour)?;
            Ok(Blob {
                area,
                bounds: Rect {
                    x: r.x as usize,
                    y: r.y as usize,
                    w: r.width as usize,
                    h: r.height as usize,
                },
            })
        })
        .collect()
}

/// The blob with the largest area.  The earliest one wins an exact tie.
pub fn largest(blobs: &[Blob]) -> Option<&Blob> {
    blobs.iter().fold(None, |best, b| match best {
        Some(top) if top.area >= b.area => Some(top),
        _ => Some(b),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
