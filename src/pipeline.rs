use anyhow::Result;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::models::Cutout;

/// Trait that all adjustment steps must implement
pub trait AdjustmentStep: Send + Sync {
    /// Transform the image produced by the previous step
    fn apply(&self, image: RgbaImage) -> RgbaImage;

    /// Human-readable name for this step (used in logs and debug output)
    fn name(&self) -> &str;

    /// Steps whose current setting has no effect are skipped entirely
    fn is_noop(&self) -> bool {
        false
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Ordered chain of adjustment steps, always run from the base cutout
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<Arc<dyn AdjustmentStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a step to the end of the chain
    pub fn add_step(mut self, step: Arc<dyn AdjustmentStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn AdjustmentStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Render the base cutout through every active step
    pub fn render(&self, base: &Cutout) -> RgbaImage {
        let mut image = base.image().clone();
        for step in &self.steps {
            if step.is_noop() {
                debug!("Skipping step: {}", step.name());
                continue;
            }
            debug!("Running step: {} ({}x{})", step.name(), image.width(), image.height());
            image = step.apply(image);
        }
        image
    }

    /// Render like [`Pipeline::render`], saving every intermediate image when debug mode is on
    pub fn run(&self, base: &Cutout) -> Result<RgbaImage> {
        let Some(debug_config) = &self.debug else {
            return Ok(self.render(base));
        };

        let save = |name: &str, image: &RgbaImage| -> Result<()> {
            let path = debug_config.output_dir.join(name);
            image
                .save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
            debug!("Debug: saved {}", name);
            Ok(())
        };

        let mut image = base.image().clone();
        save("00_base.png", &image)?;

        for (step_idx, step) in self.steps.iter().enumerate() {
            if step.is_noop() {
                debug!("Skipping step: {}", step.name());
                continue;
            }
            debug!("Running step: {} ({}x{})", step.name(), image.width(), image.height());
            image = step.apply(image);

            let filename = format!(
                "{:02}_{}.png",
                step_idx + 1,
                step.name().to_lowercase().replace(' ', "_")
            );
            save(&filename, &image)?;
        }

        Ok(image)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
