pub mod worker;

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::adjust::{self, Parameter, ParameterSet};
use crate::error::{CutoutError, Result};
use crate::extraction::extract_cutout;
use crate::models::{Cutout, Detection};

pub use worker::PreviewWorker;

/// Extension used when the export path has none
pub const DEFAULT_EXPORT_EXTENSION: &str = "png";

/// Owns the base cutout and the parameter set, and keeps the preview in sync
///
/// Every change re-renders from the base with the full parameter set, so blur
/// and resize error never compounds across edits.
pub struct PreviewController {
    base: Cutout,
    params: ParameterSet,
    preview: RgbaImage,
}

impl PreviewController {
    pub fn new(base: Cutout) -> Self {
        let params = ParameterSet::default();
        let preview = adjust::apply(&base, &params);
        Self { base, params, preview }
    }

    /// Start a session for one detection of the source image
    pub fn from_detection(source: &DynamicImage, detection: &Detection) -> Result<Self> {
        Ok(Self::new(extract_cutout(source, detection)?))
    }

    pub fn base(&self) -> &Cutout {
        &self.base
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn current_preview(&self) -> &RgbaImage {
        &self.preview
    }

    /// Set one control, clamping into its range, and re-render
    ///
    /// Returns the value that took effect.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(CutoutError::ParameterOutOfRange {
                name: parameter.name(),
                value,
            });
        }

        let (min, max) = parameter.range();
        let effective = value.clamp(min, max);
        if effective != value {
            warn!("{} = {} clamped to {}", parameter, value, effective);
        }

        self.params.set(parameter, effective);
        self.refresh();
        Ok(self.params.get(parameter))
    }

    /// Same as [`PreviewController::set_parameter`] with the control looked up by name
    pub fn set_parameter_by_name(&mut self, name: &str, value: f32) -> Result<f32> {
        let parameter: Parameter = name.parse()?;
        self.set_parameter(parameter, value)
    }

    /// Restore every control to its default
    pub fn reset(&mut self) {
        self.params = ParameterSet::default();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.preview = adjust::apply(&self.base, &self.params);
        debug!(
            "Preview refreshed: {}x{}",
            self.preview.width(),
            self.preview.height()
        );
    }

    /// Write the current preview to a lossless, alpha-preserving file
    ///
    /// Returns the path actually written. Failures leave the session untouched.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = export_path(path.as_ref());
        let format = export_format(&path)?;

        self.preview
            .save_with_format(&path, format)
            .map_err(|e| match e {
                ImageError::IoError(io) => CutoutError::Io(io),
                other => CutoutError::Image(other),
            })?;

        info!("Image saved to {}", path.display());
        Ok(path)
    }
}

fn export_path(path: &Path) -> PathBuf {
    if path.extension().is_none() {
        path.with_extension(DEFAULT_EXPORT_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

fn export_format(path: &Path) -> Result<ImageFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("tif") | Some("tiff") => Ok(ImageFormat::Tiff),
        _ => Err(CutoutError::UnsupportedFormat(path.to_path_buf())),
    }
}
