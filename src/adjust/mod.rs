pub mod color;
pub mod params;
pub mod steps;

use image::RgbaImage;
use std::sync::Arc;

use crate::models::Cutout;
use crate::pipeline::Pipeline;

pub use params::{Parameter, ParameterSet};

/// Build the fixed-order adjustment chain for a parameter set
///
/// The order matters: e.g. rotating before resizing scales the expanded canvas.
pub fn build_pipeline(params: &ParameterSet) -> Pipeline {
    use steps::*;

    Pipeline::new()
        .add_step(Arc::new(BrightnessStep { factor: params.brightness }))
        .add_step(Arc::new(ContrastStep { factor: params.contrast }))
        .add_step(Arc::new(RotateStep { degrees: params.rotation_degrees }))
        .add_step(Arc::new(ScaleStep { factor: params.scale_factor }))
        .add_step(Arc::new(FlipHorizontalStep { enabled: params.flip_horizontal }))
        .add_step(Arc::new(FlipVerticalStep { enabled: params.flip_vertical }))
        .add_step(Arc::new(SharpenStep { amount: params.sharpen_amount }))
        .add_step(Arc::new(BlurStep { radius: params.blur_radius }))
        .add_step(Arc::new(SaturationStep { factor: params.color_saturation }))
}

/// Derive a preview image from the base cutout
///
/// Pure and deterministic: the same base and parameters always give the same pixels.
pub fn apply(base: &Cutout, params: &ParameterSet) -> RgbaImage {
    build_pipeline(params).render(base)
}
