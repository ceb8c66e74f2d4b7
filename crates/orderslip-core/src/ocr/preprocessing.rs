//! Image preprocessing ahead of OCR.
//!
//! The coop order forms are photographed paper with red-ink annotations
//! that confuse the recognizer. The chain is fixed and tuned to that one
//! document style: force red ink to black, grayscale, blur, unsharp mask,
//! adaptive threshold. There is no quality feedback loop.

use image::{imageops, DynamicImage, GrayImage, Luma, RgbImage};
use tracing::debug;

/// Fixed preprocessing chain for photographed order forms.
pub struct ReceiptPreprocessor {
    /// Adaptive threshold neighborhood size.
    block_size: u32,
    /// Constant subtracted from the local mean.
    threshold_c: i32,
}

impl ReceiptPreprocessor {
    pub fn new() -> Self {
        Self {
            block_size: 11,
            threshold_c: 2,
        }
    }

    /// Run the full chain and return a binarized image.
    pub fn prepare(&self, image: &DynamicImage) -> GrayImage {
        let mut rgb = image.to_rgb8();
        let reddened = suppress_red_ink(&mut rgb);
        debug!("red-ink suppression touched {} pixels", reddened);

        let gray = imageops::grayscale(&rgb);
        let blurred = imageops::blur(&gray, 1.0);
        let sharpened = unsharp_mask(&gray, &blurred);
        self.adaptive_threshold(&sharpened)
    }

    fn adaptive_threshold(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut result = GrayImage::new(width, height);

        let half_block = self.block_size / 2;

        for y in 0..height {
            for x in 0..width {
                let mut sum = 0u32;
                let mut count = 0u32;

                let y_start = y.saturating_sub(half_block);
                let y_end = (y + half_block + 1).min(height);
                let x_start = x.saturating_sub(half_block);
                let x_end = (x + half_block + 1).min(width);

                for ly in y_start..y_end {
                    for lx in x_start..x_end {
                        sum += image.get_pixel(lx, ly)[0] as u32;
                        count += 1;
                    }
                }

                let mean = (sum / count) as i32;
                let threshold = mean - self.threshold_c;
                let pixel_value = image.get_pixel(x, y)[0] as i32;

                let output = if pixel_value > threshold { 255 } else { 0 };
                result.put_pixel(x, y, Luma([output]));
            }
        }

        result
    }
}

impl Default for ReceiptPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Force red-ink pixels to black so the recognizer reads them as text.
///
/// Returns the number of pixels rewritten.
pub fn suppress_red_ink(image: &mut RgbImage) -> usize {
    let mut touched = 0;
    for pixel in image.pixels_mut() {
        let [r, g, b] = pixel.0;
        if is_red_ink(r, g, b) {
            pixel.0 = [0, 0, 0];
            touched += 1;
        }
    }
    touched
}

/// Red hue band with enough saturation and value to be ink rather than
/// paper tint: hue within 20 degrees of 0/360, saturation and value above
/// 50/255.
fn is_red_ink(r: u8, g: u8, b: u8) -> bool {
    let (h, s, v) = rgb_to_hsv(r, g, b);
    (h <= 20.0 || h >= 320.0) && s * 255.0 >= 50.0 && v * 255.0 >= 50.0
}

fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h, s, max)
}

/// `1.5 * gray - 0.5 * blurred`, clamped to u8.
fn unsharp_mask(gray: &GrayImage, blurred: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut result = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let g = gray.get_pixel(x, y)[0] as f32;
            let b = blurred.get_pixel(x, y)[0] as f32;
            let v = (1.5 * g - 0.5 * b).clamp(0.0, 255.0) as u8;
            result.put_pixel(x, y, Luma([v]));
        }
    }

    result
}
