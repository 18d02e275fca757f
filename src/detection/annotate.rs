use ab_glyph::{Font, FontVec, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

use crate::detection::DetectionSet;
use crate::error::Result;
use crate::models::Detection;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_THICKNESS: u32 = 2;
const LABEL_SCALE: f32 = 16.0;
const LABEL_GAP: i32 = 2;

/// Draw every detection's bounding box onto a copy of the source image
pub fn annotate(source: &DynamicImage, detections: &DetectionSet) -> RgbImage {
    let mut canvas = source.to_rgb8();

    for (_, detection) in detections.iter() {
        let bbox = detection.bbox;
        for inset in 0..BOX_THICKNESS {
            let width = bbox.width().saturating_sub(2 * inset);
            let height = bbox.height().saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            let rect = Rect::at((bbox.x0 + inset) as i32, (bbox.y0 + inset) as i32).of_size(width, height);
            draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
        }
    }

    canvas
}

/// Like [`annotate`], with `ID: label (score)` written above each box
///
/// Boxes touching the top edge get their label just inside instead.
pub fn annotate_with_labels(source: &DynamicImage, detections: &DetectionSet, font: &impl Font) -> RgbImage {
    let mut canvas = annotate(source, detections);
    let line_height = LABEL_SCALE.ceil() as i32;

    for (id, detection) in detections.iter() {
        let x = detection.bbox.x0 as i32;
        let above = detection.bbox.y0 as i32 - line_height - LABEL_GAP;
        let y = if above >= 0 {
            above
        } else {
            detection.bbox.y0 as i32 + BOX_THICKNESS as i32 + LABEL_GAP
        };
        draw_text_mut(
            &mut canvas,
            BOX_COLOR,
            x,
            y,
            PxScale::from(LABEL_SCALE),
            font,
            &label_text(id, detection),
        );
    }

    canvas
}

/// Caption matching the CLI's detection listing
pub fn label_text(id: usize, detection: &Detection) -> String {
    format!("{}: {} ({:.2})", id, detection.label, detection.score)
}

/// Load a TrueType/OpenType font for box labels
pub fn load_font(path: impl AsRef<Path>) -> Result<FontVec> {
    let bytes = std::fs::read(path)?;
    Ok(FontVec::try_from_vec(bytes)?)
}
