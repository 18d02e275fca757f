pub mod adjust;
pub mod detection;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod preview;

pub use adjust::{Parameter, ParameterSet};
pub use detection::{DetectionSet, Detector, JsonDetector};
pub use error::{CutoutError, Result};
pub use extraction::{composite, extract_cutout, normalize};
pub use models::{BinaryMask, BoundingBox, Cutout, Detection, ProbabilityMask};
pub use pipeline::{AdjustmentStep, DebugConfig, Pipeline};
pub use preview::{PreviewController, PreviewWorker};
