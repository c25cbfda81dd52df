//! Raster recompression backend.
//!
//! Delegates decode and re-encode to the `image` crate, the stand-in for
//! the browser canvas encoder: JPEG is re-encoded at the configured quality,
//! PNG is re-encoded losslessly at maximum compression, and the optional
//! WebP conversion produces lossless WebP.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;

use crate::core::ImageOptions;
use crate::utils::{base_name, ImageFormat, OptimizerError, OptimizerResult};

/// Re-encodes one raster image.
///
/// Returns the encoded bytes together with the format actually produced,
/// which differs from `source_format` when WebP conversion is enabled.
/// Callers are expected to run this on the blocking thread pool.
pub fn recompress(
    data: &[u8],
    source_format: ImageFormat,
    options: &ImageOptions,
) -> OptimizerResult<(Vec<u8>, ImageFormat)> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| OptimizerError::image(format!("Failed to load image: {e}")))?;

    let target = if options.convert_to_webp {
        ImageFormat::WebP
    } else {
        source_format
    };

    let encoded = encode(decoded, target, options.quality)?;
    Ok((encoded, target))
}

fn encode(decoded: DynamicImage, target: ImageFormat, quality: u8) -> OptimizerResult<Vec<u8>> {
    let mut out = Vec::new();
    match target {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel; flatten first
            let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
                .map_err(|e| OptimizerError::image(format!("JPEG encode failed: {e}")))?;
        }
        ImageFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);
            decoded
                .write_with_encoder(encoder)
                .map_err(|e| OptimizerError::image(format!("PNG encode failed: {e}")))?;
        }
        ImageFormat::WebP => {
            // The webp encoder only accepts 8-bit RGB/RGBA buffers
            let rgba = match decoded {
                img @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => img,
                other => DynamicImage::ImageRgba8(other.to_rgba8()),
            };
            let encoder = WebPEncoder::new_lossless(&mut out);
            rgba.write_with_encoder(encoder)
                .map_err(|e| OptimizerError::image(format!("WebP encode failed: {e}")))?;
        }
    }
    Ok(out)
}

/// Derives the artifact name; only a WebP conversion changes the extension.
pub fn artifact_name(file_name: &str, produced: ImageFormat, converted: bool) -> String {
    if converted {
        format!("{}.{}", base_name(file_name), produced.primary_extension())
    } else {
        file_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn sample_png() -> Vec<u8> {
        let img = ImageBuffer::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 128u8, 255u8])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_with_encoder(PngEncoder::new(&mut bytes))
            .unwrap();
        bytes
    }

    #[test]
    fn png_roundtrip_stays_png() {
        let (out, format) = recompress(
            &sample_png(),
            ImageFormat::Png,
            &ImageOptions::default(),
        )
        .unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[test]
    fn webp_conversion_changes_format() {
        let options = ImageOptions {
            convert_to_webp: true,
            ..ImageOptions::default()
        };
        let (out, format) = recompress(&sample_png(), ImageFormat::Png, &options).unwrap();
        assert_eq!(format, ImageFormat::WebP);
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::WebP
        );
    }

    #[test]
    fn jpeg_encode_flattens_alpha() {
        // Source has an alpha channel; encoding as JPEG must not fail
        let (out, format) = recompress(
            &sample_png(),
            ImageFormat::Jpeg,
            &ImageOptions::default(),
        )
        .unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = recompress(b"not an image", ImageFormat::Png, &ImageOptions::default());
        assert!(matches!(err, Err(OptimizerError::Image(_))));
    }

    #[test]
    fn artifact_names() {
        assert_eq!(
            artifact_name("photo.png", ImageFormat::WebP, true),
            "photo.webp"
        );
        assert_eq!(
            artifact_name("photo.png", ImageFormat::Png, false),
            "photo.png"
        );
    }
}
