#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from cutout_editor for tests
pub use cutout_editor::{
    BinaryMask, BoundingBox, Cutout, CutoutError, Detection, Parameter, ParameterSet,
    PreviewController, ProbabilityMask,
};
