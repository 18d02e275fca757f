use image::DynamicImage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::detection::Detector;
use crate::error::Result;
use crate::models::{BoundingBox, Detection, ProbabilityMask};

/// One detection as written by the segmentation model
#[derive(Debug, Deserialize)]
struct DetectionRecord {
    label: String,
    score: f32,
    #[serde(rename = "box")]
    bbox: [i64; 4],
    mask: Vec<Vec<f32>>,
}

/// Detector that replays model output stored as JSON
///
/// The file holds an array of `{"label", "score", "box": [x0, y0, x1, y1], "mask": [[..]]}`.
pub struct JsonDetector {
    path: PathBuf,
}

impl JsonDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Detector for JsonDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>> {
        let contents = std::fs::read_to_string(&self.path)?;
        parse_detections(&contents, image.width(), image.height())
    }
}

/// Parse detector JSON, clipping every box to the image bounds
pub fn parse_detections(json: &str, image_width: u32, image_height: u32) -> Result<Vec<Detection>> {
    let records: Vec<DetectionRecord> = serde_json::from_str(json)?;

    records
        .into_iter()
        .map(|record| -> Result<Detection> {
            let [x0, y0, x1, y1] = record.bbox;
            Ok(Detection {
                label: record.label,
                score: record.score,
                bbox: BoundingBox::clipped(x0, y0, x1, y1, image_width, image_height),
                mask: ProbabilityMask::from_rows(record.mask)?,
            })
        })
        .collect()
}
