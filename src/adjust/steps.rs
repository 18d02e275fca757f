use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};

use crate::adjust::color::{blend, luma, map_visible_rgb, to_channel};
use crate::pipeline::AdjustmentStep;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Slack when snapping rotated extents, so 90° on a float grid does not grow a pixel
const BOUNDS_EPSILON: f32 = 1e-3;

/// Transparent border added around the source before an arbitrary-angle warp
const ROTATE_PADDING: u32 = 1;

/// Multiplicative gain on the color channels
pub struct BrightnessStep {
    pub factor: f32,
}

impl AdjustmentStep for BrightnessStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        map_visible_rgb(image, |rgb| rgb.map(|v| blend(0.0, v, self.factor)))
    }

    fn name(&self) -> &str {
        "Brightness"
    }
}

/// Spread channels away from (or towards) mid-gray
pub struct ContrastStep {
    pub factor: f32,
}

impl AdjustmentStep for ContrastStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        map_visible_rgb(image, |rgb| rgb.map(|v| blend(128.0, v, self.factor)))
    }

    fn name(&self) -> &str {
        "Contrast"
    }
}

/// Counter-clockwise rotation; the canvas grows so no corner is cropped
pub struct RotateStep {
    pub degrees: f32,
}

impl AdjustmentStep for RotateStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        let quarter_turns = self.degrees / 90.0;
        if quarter_turns.fract() == 0.0 {
            // Lossless transposition for right angles
            return match (quarter_turns as i64).rem_euclid(4) {
                0 => image,
                1 => imageops::rotate270(&image),
                2 => imageops::rotate180(&image),
                _ => imageops::rotate90(&image),
            };
        }
        rotate_expanded(&image, self.degrees)
    }

    fn name(&self) -> &str {
        "Rotate"
    }
}

/// Canvas size needed to hold a `width`x`height` image rotated by `degrees`
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (width as f32, height as f32);
    let snap = |extent: f32| (extent - BOUNDS_EPSILON).ceil().max(1.0) as u32;
    (snap(w * cos + h * sin), snap(w * sin + h * cos))
}

fn rotate_expanded(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (out_width, out_height) = rotated_bounds(width, height, degrees);

    // Bilinear sampling drops anything outside the pixel centers, so give the
    // edge pixels a transparent neighbour to fade into
    let mut padded = RgbaImage::from_pixel(
        width + 2 * ROTATE_PADDING,
        height + 2 * ROTATE_PADDING,
        TRANSPARENT,
    );
    let offset = ROTATE_PADDING as i64;
    imageops::replace(&mut padded, image, offset, offset);

    let (cx, cy) = (
        (padded.width() as f32 - 1.0) / 2.0,
        (padded.height() as f32 - 1.0) / 2.0,
    );
    let (out_cx, out_cy) = ((out_width as f32 - 1.0) / 2.0, (out_height as f32 - 1.0) / 2.0);

    // Projection::rotate turns clockwise on screen (y points down)
    let projection = Projection::translate(out_cx, out_cy)
        * Projection::rotate(-degrees.to_radians())
        * Projection::translate(-cx, -cy);

    let mut rotated = RgbaImage::from_pixel(out_width, out_height, TRANSPARENT);
    warp_into(&padded, &projection, Interpolation::Bilinear, TRANSPARENT, &mut rotated);
    rotated
}

/// Uniform resize of the current canvas
pub struct ScaleStep {
    pub factor: f32,
}

impl AdjustmentStep for ScaleStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        let scaled_w = ((width as f32 * self.factor) as u32).max(1);
        let scaled_h = ((height as f32 * self.factor) as u32).max(1);

        if (scaled_w, scaled_h) == (width, height) {
            return image;
        }

        // Lanczos3 avoids aliasing in both directions
        imageops::resize(&image, scaled_w, scaled_h, FilterType::Lanczos3)
    }

    fn name(&self) -> &str {
        "Scale"
    }
}

/// Mirror left/right
pub struct FlipHorizontalStep {
    pub enabled: bool,
}

impl AdjustmentStep for FlipHorizontalStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        imageops::flip_horizontal(&image)
    }

    fn name(&self) -> &str {
        "Flip Horizontal"
    }

    fn is_noop(&self) -> bool {
        !self.enabled
    }
}

/// Mirror top/bottom
pub struct FlipVerticalStep {
    pub enabled: bool,
}

impl AdjustmentStep for FlipVerticalStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        imageops::flip_vertical(&image)
    }

    fn name(&self) -> &str {
        "Flip Vertical"
    }

    fn is_noop(&self) -> bool {
        !self.enabled
    }
}

/// Unsharp-mask style enhancement, active only above 1.0
pub struct SharpenStep {
    pub amount: f32,
}

impl AdjustmentStep for SharpenStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        if width < 3 || height < 3 {
            return image;
        }

        let mut sharpened = image.clone();

        // Smoothing kernel: center weight 5, neighbours 1, normalized by 13.
        // Extrapolating away from the smoothed value enhances edges.
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let center = image.get_pixel(x, y);
                if center[3] == 0 {
                    continue;
                }

                let mut smoothed = [0.0f32; 3];
                for dy in 0..3 {
                    for dx in 0..3 {
                        let neighbour = image.get_pixel(x + dx - 1, y + dy - 1);
                        let weight = if dx == 1 && dy == 1 { 5.0 } else { 1.0 };
                        for c in 0..3 {
                            smoothed[c] += weight * neighbour[c] as f32;
                        }
                    }
                }

                let out = sharpened.get_pixel_mut(x, y);
                for c in 0..3 {
                    out[c] = to_channel(blend(smoothed[c] / 13.0, center[c] as f32, self.amount));
                }
            }
        }

        // Edges keep their value: the smoothed copy is not defined there
        sharpened
    }

    fn name(&self) -> &str {
        "Sharpen"
    }

    fn is_noop(&self) -> bool {
        !(self.amount > 1.0)
    }
}

/// Gaussian blur with sigma equal to the radius
pub struct BlurStep {
    pub radius: f32,
}

impl AdjustmentStep for BlurStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        gaussian_blur_f32(&image, self.radius)
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }

    fn is_noop(&self) -> bool {
        !(self.radius > 0.0)
    }
}

/// Scale each pixel's distance from its own gray value
pub struct SaturationStep {
    pub factor: f32,
}

impl AdjustmentStep for SaturationStep {
    fn apply(&self, image: RgbaImage) -> RgbaImage {
        map_visible_rgb(image, |rgb| {
            let gray = luma(rgb);
            rgb.map(|v| blend(gray, v, self.factor))
        })
    }

    fn name(&self) -> &str {
        "Saturation"
    }
}
