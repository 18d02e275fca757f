use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

use crate::error::{CutoutError, Result};
use crate::models::{BinaryMask, ProbabilityMask};

/// Probability above which a pixel belongs to the object
pub const MASK_THRESHOLD: f32 = 0.5;

/// 5-tap binomial approximation of a Gaussian (radius 2px)
const SMOOTHING_KERNEL: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

type FloatGrid = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Resample a detector mask to the ROI size, smooth it and binarize it
pub fn normalize(raw: &ProbabilityMask, target_width: u32, target_height: u32) -> Result<BinaryMask> {
    if target_width == 0 || target_height == 0 {
        return Err(CutoutError::InvalidRegion {
            width: target_width,
            height: target_height,
        });
    }

    let grid: FloatGrid = ImageBuffer::from_raw(raw.width(), raw.height(), raw.values().to_vec())
        .ok_or_else(|| CutoutError::InvalidMask("mask values do not fill the grid".to_string()))?;

    // Catmull-Rom is the bicubic filter; nearest-neighbour gives blocky edges
    let resized = imageops::resize(&grid, target_width, target_height, FilterType::CatmullRom);
    let smoothed = smooth(resized.as_raw(), target_width as usize, target_height as usize);

    let width = target_width as usize;
    Ok(BinaryMask::from_fn(target_width, target_height, |x, y| {
        smoothed[y as usize * width + x as usize] > MASK_THRESHOLD
    }))
}

/// Separable smoothing pass over a row-major float field
fn smooth(values: &[f32], width: usize, height: usize) -> Vec<f32> {
    let radius = (SMOOTHING_KERNEL.len() / 2) as isize;

    let mut horizontal = vec![0.0f32; values.len()];
    for y in 0..height {
        let row = &values[y * width..(y + 1) * width];
        for x in 0..width {
            horizontal[y * width + x] = SMOOTHING_KERNEL
                .iter()
                .enumerate()
                .map(|(k, w)| w * row[reflect(x as isize + k as isize - radius, width)])
                .sum();
        }
    }

    let mut out = vec![0.0f32; values.len()];
    for y in 0..height {
        for x in 0..width {
            out[y * width + x] = SMOOTHING_KERNEL
                .iter()
                .enumerate()
                .map(|(k, w)| w * horizontal[reflect(y as isize + k as isize - radius, height) * width + x])
                .sum();
        }
    }
    out
}

/// Mirror an out-of-bounds index back inside `0..len` without repeating the edge
fn reflect(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let folded = index.rem_euclid(period) as usize;
    if folded >= len { period as usize - folded } else { folded }
}
