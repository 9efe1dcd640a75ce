//! Client-side image compression.
//!
//! Policy: longest edge capped at 1920 px, re-encoded as JPEG with
//! stepped quality aiming for roughly 1 MiB. The size target is soft:
//! the lowest quality step is accepted even when it stays above it.

use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;

pub const MAX_DIMENSION: u32 = 1920;
pub const MAX_BYTES: usize = 1024 * 1024;

const QUALITY_STEPS: [u8; 4] = [85, 75, 65, 50];

pub fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();

    let bounded = if width.max(height) > MAX_DIMENSION {
        decoded.thumbnail(MAX_DIMENSION, MAX_DIMENSION)
    } else {
        decoded
    };
    let rgb = bounded.to_rgb8();

    let mut smallest = Vec::new();
    for quality in QUALITY_STEPS {
        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut out, quality);
        rgb.write_with_encoder(encoder)?;
        if out.len() <= MAX_BYTES {
            return Ok(out);
        }
        smallest = out;
    }
    Ok(smallest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut out = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut out);
        img.write_with_encoder(encoder).unwrap();
        out
    }

    #[test]
    fn oversized_image_is_bounded_to_max_dimension() {
        let png = gradient_png(4000, 1000);
        let jpeg = compress_bytes(&png).unwrap();
        let reloaded = image::load_from_memory(&jpeg).unwrap();
        let (w, h) = reloaded.dimensions();
        assert!(w.max(h) <= MAX_DIMENSION);
        // Aspect ratio preserved: 4:1 within rounding.
        assert_eq!(w, 1920);
        assert_eq!(h, 480);
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        let png = gradient_png(640, 480);
        let jpeg = compress_bytes(&png).unwrap();
        let reloaded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(reloaded.dimensions(), (640, 480));
    }

    #[test]
    fn non_image_bytes_fail_to_compress() {
        assert!(compress_bytes(b"definitely not an image").is_err());
    }
}
