use std::fmt;
use std::str::FromStr;

use crate::error::CutoutError;

/// One adjustable control of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Brightness,
    Contrast,
    RotationDegrees,
    ScaleFactor,
    FlipHorizontal,
    FlipVertical,
    SharpenAmount,
    BlurRadius,
    ColorSaturation,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Brightness,
        Parameter::Contrast,
        Parameter::RotationDegrees,
        Parameter::ScaleFactor,
        Parameter::FlipHorizontal,
        Parameter::FlipVertical,
        Parameter::SharpenAmount,
        Parameter::BlurRadius,
        Parameter::ColorSaturation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Brightness => "brightness",
            Parameter::Contrast => "contrast",
            Parameter::RotationDegrees => "rotation_degrees",
            Parameter::ScaleFactor => "scale_factor",
            Parameter::FlipHorizontal => "flip_horizontal",
            Parameter::FlipVertical => "flip_vertical",
            Parameter::SharpenAmount => "sharpen_amount",
            Parameter::BlurRadius => "blur_radius",
            Parameter::ColorSaturation => "color_saturation",
        }
    }

    /// Inclusive (min, max) accepted by the adjustment surface
    pub fn range(self) -> (f32, f32) {
        match self {
            Parameter::Brightness => (0.5, 2.0),
            Parameter::Contrast => (0.5, 2.0),
            Parameter::RotationDegrees => (-180.0, 180.0),
            Parameter::ScaleFactor => (0.1, 2.0),
            Parameter::FlipHorizontal | Parameter::FlipVertical => (0.0, 1.0),
            Parameter::SharpenAmount => (1.0, 5.0),
            Parameter::BlurRadius => (0.0, 10.0),
            Parameter::ColorSaturation => (0.0, 2.0),
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(self, Parameter::FlipHorizontal | Parameter::FlipVertical)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = CutoutError;

    /// Accepts `rotation_degrees`, `rotationDegrees` and `rotation-degrees` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Parameter::ALL
            .into_iter()
            .find(|p| p.name().replace('_', "") == key)
            .ok_or_else(|| CutoutError::UnknownParameter(s.to_string()))
    }
}

/// Current value of every adjustment control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    pub brightness: f32,
    pub contrast: f32,
    pub rotation_degrees: f32,
    pub scale_factor: f32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub sharpen_amount: f32,
    pub blur_radius: f32,
    pub color_saturation: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            rotation_degrees: 0.0,
            scale_factor: 1.0,
            flip_horizontal: false,
            flip_vertical: false,
            sharpen_amount: 1.0,
            blur_radius: 0.0,
            color_saturation: 1.0,
        }
    }
}

impl ParameterSet {
    /// Read a parameter as a number (flags read as 0.0 or 1.0)
    pub fn get(&self, parameter: Parameter) -> f32 {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match parameter {
            Parameter::Brightness => self.brightness,
            Parameter::Contrast => self.contrast,
            Parameter::RotationDegrees => self.rotation_degrees,
            Parameter::ScaleFactor => self.scale_factor,
            Parameter::FlipHorizontal => flag(self.flip_horizontal),
            Parameter::FlipVertical => flag(self.flip_vertical),
            Parameter::SharpenAmount => self.sharpen_amount,
            Parameter::BlurRadius => self.blur_radius,
            Parameter::ColorSaturation => self.color_saturation,
        }
    }

    /// Store a value verbatim; range handling belongs to the caller
    pub fn set(&mut self, parameter: Parameter, value: f32) {
        let flag = value >= 0.5;
        match parameter {
            Parameter::Brightness => self.brightness = value,
            Parameter::Contrast => self.contrast = value,
            Parameter::RotationDegrees => self.rotation_degrees = value,
            Parameter::ScaleFactor => self.scale_factor = value,
            Parameter::FlipHorizontal => self.flip_horizontal = flag,
            Parameter::FlipVertical => self.flip_vertical = flag,
            Parameter::SharpenAmount => self.sharpen_amount = value,
            Parameter::BlurRadius => self.blur_radius = value,
            Parameter::ColorSaturation => self.color_saturation = value,
        }
    }
}
