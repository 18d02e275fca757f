use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cutout_editor::detection::{self, DEFAULT_CONFIDENCE_THRESHOLD};
use cutout_editor::{CutoutError, DetectionSet, JsonDetector, Parameter, PreviewController, adjust};

#[derive(Parser)]
#[command(name = "cutout-editor")]
#[command(about = "Cut a detected object out of a photo and adjust it")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Detector output: JSON array of {label, score, box, mask}
    #[arg(short, long, value_name = "JSON")]
    detections: PathBuf,

    /// Detections scoring at or below this are ignored
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)]
    threshold: f32,

    /// ID of the object to extract (only lists detections when omitted)
    #[arg(short, long, value_name = "ID")]
    select: Option<usize>,

    /// Adjustment as NAME=VALUE, applied in order; may be repeated
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_setting)]
    settings: Vec<(Parameter, f32)>,

    /// Where to save the edited cutout (.png is added when there is no extension)
    #[arg(short, long, default_value = "extracted_object.png")]
    output: PathBuf,

    /// Save a copy of the input with detection boxes drawn on it
    #[arg(long, value_name = "PATH")]
    annotate: Option<PathBuf>,

    /// Font used to label boxes in the --annotate image (boxes only without it)
    #[arg(long, value_name = "TTF", requires = "annotate")]
    font: Option<PathBuf>,

    /// Save every adjustment step to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_setting(s: &str) -> Result<(Parameter, f32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let parameter: Parameter = name
        .trim()
        .parse()
        .map_err(|e: CutoutError| e.to_string())?;
    let value = match value.trim() {
        "true" => 1.0,
        "false" => 0.0,
        v => v
            .parse::<f32>()
            .map_err(|e| format!("invalid value '{}': {}", v, e))?,
    };
    Ok((parameter, value))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cutout_editor=debug" } else { "cutout_editor=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    // Load image
    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    info!("Image loaded: {}x{}", img.width(), img.height());

    let detector = JsonDetector::new(&args.detections);
    let detections = DetectionSet::detect(&detector, &img, args.threshold)
        .with_context(|| format!("Failed to read detections from {}", args.detections.display()))?;

    if let Some(path) = &args.annotate {
        let annotated = match &args.font {
            Some(font_path) => {
                let font = detection::load_font(font_path)
                    .with_context(|| format!("Failed to load font {}", font_path.display()))?;
                detection::annotate_with_labels(&img, &detections, &font)
            }
            None => detection::annotate(&img, &detections),
        };
        annotated
            .save(path)
            .with_context(|| format!("Failed to save annotated image to {}", path.display()))?;
        println!("Annotated image saved to {}", path.display());
    }

    if detections.is_empty() {
        println!("No objects detected.");
        return Ok(());
    }

    println!("Detected objects:");
    for (id, det) in detections.iter() {
        println!("ID: {} - Label: {} (Confidence: {:.2})", id, det.label, det.score);
    }

    let Some(choice) = args.select else {
        return Ok(());
    };
    let selected = detections
        .get(choice)
        .ok_or_else(|| anyhow::anyhow!("Invalid choice: no detection with ID {}", choice))?;

    let mut controller = PreviewController::from_detection(&img, selected)
        .with_context(|| format!("Failed to extract detection {}", choice))?;

    for (parameter, value) in &args.settings {
        let effective = controller.set_parameter(*parameter, *value)?;
        info!("{} = {}", parameter, effective);
    }

    if let Some(debug_dir) = args.debug_out {
        adjust::build_pipeline(controller.parameters())
            .with_debug(debug_dir)?
            .run(controller.base())?;
    }

    let saved = controller
        .export(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    println!("Image saved to {}", saved.display());

    Ok(())
}
