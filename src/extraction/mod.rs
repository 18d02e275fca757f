pub mod compositor;
pub mod mask;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Cutout, Detection};

pub use compositor::composite;
pub use mask::normalize;

/// Turn one detection into the base cutout for an editing session
///
/// Any error here is fatal for the session; there is no partial cutout.
pub fn extract_cutout(source: &DynamicImage, detection: &Detection) -> Result<Cutout> {
    let roi = detection.bbox.crop_roi(source)?;
    debug!(
        "Cropped ROI {}x{} at ({}, {})",
        roi.width(),
        roi.height(),
        detection.bbox.x0,
        detection.bbox.y0
    );

    let mask = normalize(&detection.mask, roi.width(), roi.height())?;
    debug!(
        "Normalized {}x{} mask to {}x{} ({} foreground pixels)",
        detection.mask.width(),
        detection.mask.height(),
        mask.width(),
        mask.height(),
        mask.count_set()
    );

    let cutout = composite(&roi, &mask)?;
    info!(
        "Extracted '{}' ({:.2}) as {}x{} cutout",
        detection.label,
        detection.score,
        cutout.width(),
        cutout.height()
    );
    Ok(cutout)
}
