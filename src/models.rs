use image::{DynamicImage, RgbImage, RgbaImage};
use std::sync::Arc;

use crate::error::{CutoutError, Result};

/// Bounding box in the source image, upper bounds exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    /// Clip raw detector coordinates to an image of the given size
    pub fn clipped(x0: i64, y0: i64, x1: i64, y1: i64, image_width: u32, image_height: u32) -> Self {
        let clip_x = |v: i64| v.clamp(0, image_width as i64) as u32;
        let clip_y = |v: i64| v.clamp(0, image_height as i64) as u32;
        Self {
            x0: clip_x(x0),
            y0: clip_y(y0),
            x1: clip_x(x1),
            y1: clip_y(y1),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Crop the region of interest out of the source image
    pub fn crop_roi(&self, source: &DynamicImage) -> Result<RgbImage> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 || self.x1 > source.width() || self.y1 > source.height() {
            return Err(CutoutError::InvalidRegion { width, height });
        }
        Ok(source.crop_imm(self.x0, self.y0, width, height).to_rgb8())
    }
}

/// Per-pixel object probabilities emitted by the detector at a fixed resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMask {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ProbabilityMask {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CutoutError::InvalidMask("mask grid is empty".to_string()));
        }
        if values.len() != (width as usize) * (height as usize) {
            return Err(CutoutError::InvalidMask(format!(
                "expected {} values for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                values.len()
            )));
        }
        Ok(Self { width, height, values })
    }

    /// Build a mask from row-major nested rows (the detector's JSON layout)
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len()) as u32;
        if rows.iter().any(|row| row.len() as u32 != width) {
            return Err(CutoutError::InvalidMask("mask rows have different lengths".to_string()));
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// A mask with every cell set to the same probability
    pub fn uniform(width: u32, height: u32, value: f32) -> Result<Self> {
        Self::new(width, height, vec![value; (width as usize) * (height as usize)])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }
}

/// One object found by the external detector
#[derive(Debug, Clone)]
pub struct Detection {
    pub label: String,
    pub score: f32,
    pub bbox: BoundingBox,
    pub mask: ProbabilityMask,
}

/// Hard foreground mask with the same size as the region of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryMask {
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * self.width + x) as usize]
    }

    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// The immutable alpha-masked base image every edit is derived from
#[derive(Debug, Clone)]
pub struct Cutout {
    image: Arc<RgbaImage>,
}

impl Cutout {
    /// Cutouts are only built by the compositor
    pub(crate) fn from_composited(image: RgbaImage) -> Self {
        Self { image: Arc::new(image) }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
