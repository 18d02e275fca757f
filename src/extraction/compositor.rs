use image::{Rgba, RgbImage, RgbaImage};

use crate::error::{CutoutError, Result};
use crate::models::{BinaryMask, Cutout};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Cut the masked object out of the ROI onto a transparent background
///
/// The alpha edge is hard: pixels are either fully opaque or fully transparent.
pub fn composite(roi: &RgbImage, mask: &BinaryMask) -> Result<Cutout> {
    if roi.dimensions() != mask.dimensions() {
        return Err(CutoutError::DimensionMismatch {
            image_width: roi.width(),
            image_height: roi.height(),
            mask_width: mask.width(),
            mask_height: mask.height(),
        });
    }

    let cutout = RgbaImage::from_fn(roi.width(), roi.height(), |x, y| {
        if mask.get(x, y) {
            let [r, g, b] = roi.get_pixel(x, y).0;
            Rgba([r, g, b, 255])
        } else {
            TRANSPARENT
        }
    });

    Ok(Cutout::from_composited(cutout))
}
