use image::RgbaImage;

/// ITU-R 601 luma of an RGB triple
pub fn luma([r, g, b]: [f32; 3]) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Interpolate (or extrapolate, for factors above 1) from `degenerate` towards `value`
///
/// A factor of exactly 1.0 returns `value` bit-for-bit.
#[inline]
pub fn blend(degenerate: f32, value: f32, factor: f32) -> f32 {
    degenerate * (1.0 - factor) + value * factor
}

/// Round and saturate into a u8 channel
#[inline]
pub fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Rewrite the RGB of every pixel that is at least partly visible
///
/// Alpha is never touched and fully transparent pixels keep their color.
pub fn map_visible_rgb<F>(mut image: RgbaImage, transform: F) -> RgbaImage
where
    F: Fn([f32; 3]) -> [f32; 3],
{
    for pixel in image.pixels_mut() {
        if pixel[3] == 0 {
            continue;
        }
        let rgb = [pixel[0] as f32, pixel[1] as f32, pixel[2] as f32];
        let [r, g, b] = transform(rgb);
        pixel[0] = to_channel(r);
        pixel[1] = to_channel(g);
        pixel[2] = to_channel(b);
    }
    image
}
