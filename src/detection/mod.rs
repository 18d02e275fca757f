pub mod annotate;
pub mod json;

use image::DynamicImage;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::Detection;

pub use annotate::{annotate, annotate_with_labels, label_text, load_font};
pub use json::JsonDetector;

/// Detections at or below this confidence are dropped
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Source of detections for an image (the segmentation model lives behind this)
pub trait Detector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>>;
}

/// Confident detections keyed by their index in the detector output
#[derive(Debug, Clone, Default)]
pub struct DetectionSet {
    detections: BTreeMap<usize, Detection>,
}

impl DetectionSet {
    /// Keep detections scoring strictly above `threshold`
    pub fn from_detections(detections: Vec<Detection>, threshold: f32) -> Self {
        let detections = detections
            .into_iter()
            .enumerate()
            .filter(|(_, d)| d.score > threshold)
            .collect();
        Self { detections }
    }

    /// Run a detector and keep its confident detections
    pub fn detect(detector: &dyn Detector, image: &DynamicImage, threshold: f32) -> Result<Self> {
        Ok(Self::from_detections(detector.detect(image)?, threshold))
    }

    pub fn get(&self, id: usize) -> Option<&Detection> {
        self.detections.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Detection)> {
        self.detections.iter().map(|(id, d)| (*id, d))
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
