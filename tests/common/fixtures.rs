use cutout_editor::{BinaryMask, BoundingBox, Cutout, Detection, ProbabilityMask, composite};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

/// Creates a WxH image where every pixel has a distinct, non-gray color
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x * 7 + y * 13) % 256) as u8,
        ])
    })
}

/// Creates a WxH source photo as a DynamicImage
pub fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(gradient_image(width, height))
}

/// Centered ellipse touching the middle of each edge
pub fn ellipse_mask(width: u32, height: u32) -> BinaryMask {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    BinaryMask::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - cx) / cx;
        let dy = (y as f32 + 0.5 - cy) / cy;
        dx * dx + dy * dy <= 1.0
    })
}

/// Gradient object inside an ellipse on a transparent background
pub fn ellipse_cutout(width: u32, height: u32) -> Cutout {
    composite(&gradient_image(width, height), &ellipse_mask(width, height))
        .expect("Failed to composite test cutout")
}

/// Gradient object filling the whole canvas
pub fn opaque_cutout(width: u32, height: u32) -> Cutout {
    composite(&gradient_image(width, height), &BinaryMask::from_fn(width, height, |_, _| true))
        .expect("Failed to composite test cutout")
}

/// Creates a Detection with a uniform 15x15 mask
pub fn make_detection(label: &str, score: f32, bbox: BoundingBox, probability: f32) -> Detection {
    Detection {
        label: label.to_string(),
        score,
        bbox,
        mask: ProbabilityMask::uniform(15, 15, probability).expect("Failed to build mask"),
    }
}
