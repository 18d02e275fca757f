use std::path::PathBuf;

/// Errors produced while extracting and editing a cutout
#[derive(Debug, thiserror::Error)]
pub enum CutoutError {
    #[error("Invalid region: {width}x{height}")]
    InvalidRegion { width: u32, height: u32 },

    #[error("Dimension mismatch: image is {image_width}x{image_height}, mask is {mask_width}x{mask_height}")]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Parameter {name} out of range: {value}")]
    ParameterOutOfRange { name: &'static str, value: f32 },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Unsupported export format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid label font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Invalid detections: {0}")]
    Detections(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CutoutError>;
