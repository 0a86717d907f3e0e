//! Profile image thumbnails.
//!
//! A thumbnail is a fixed-height copy of the source image with the width
//! scaled to preserve the aspect ratio, re-encoded in the source format.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

/// Height of every generated thumbnail, in pixels.
pub const THUMBNAIL_HEIGHT: u32 = 200;

/// Widest thumbnail produced; wider aspect ratios are rejected.
pub const MAX_THUMBNAIL_WIDTH: u32 = 20 * THUMBNAIL_HEIGHT;

/// Source formats accepted for profile images.
pub const SUPPORTED_FORMATS: &[ImageFormat] =
    &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Image has zero width or height")]
    EmptyImage,

    #[error("Image of {width}x{height} is too wide for a thumbnail")]
    TooWide { width: u32, height: u32 },

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// An encoded thumbnail together with the format it was encoded in.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    /// File extension matching the encoded format.
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// Detect the format of an encoded image, rejecting unsupported ones.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ThumbnailError> {
    let format = image::guess_format(bytes).map_err(|_| ThumbnailError::UnsupportedFormat)?;
    if SUPPORTED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(ThumbnailError::UnsupportedFormat)
    }
}

/// Width that keeps the aspect ratio of a `width` x `height` image at
/// [`THUMBNAIL_HEIGHT`], or `None` past [`MAX_THUMBNAIL_WIDTH`].
pub fn scaled_width(width: u32, height: u32) -> Option<u32> {
    let scaled = (f64::from(width) * f64::from(THUMBNAIL_HEIGHT) / f64::from(height)).round();
    if scaled > f64::from(MAX_THUMBNAIL_WIDTH) {
        None
    } else {
        Some((scaled as u32).max(1))
    }
}

/// Decode `bytes`, resize to [`THUMBNAIL_HEIGHT`] and re-encode in the same format.
///
/// Dimensions are read from the header and checked before any pixel data
/// is decoded.
pub fn make_thumbnail(bytes: &[u8]) -> Result<Thumbnail, ThumbnailError> {
    let format = detect_format(bytes)?;
    let (src_width, src_height) =
        ImageReader::with_format(Cursor::new(bytes), format).into_dimensions()?;
    if src_width == 0 || src_height == 0 {
        return Err(ThumbnailError::EmptyImage);
    }
    let width = scaled_width(src_width, src_height).ok_or(ThumbnailError::TooWide {
        width: src_width,
        height: src_height,
    })?;

    let source = image::load_from_memory_with_format(bytes, format)?;
    let resized = source.resize_exact(width, THUMBNAIL_HEIGHT, FilterType::Lanczos3);

    // JPEG has no alpha channel and the WebP encoder only takes 8-bit RGB(A).
    let encodable = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        ImageFormat::WebP => DynamicImage::ImageRgba8(resized.to_rgba8()),
        _ => resized,
    };

    let mut out = Cursor::new(Vec::new());
    encodable.write_to(&mut out, format)?;

    Ok(Thumbnail {
        bytes: out.into_inner(),
        format,
        width,
        height: THUMBNAIL_HEIGHT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 90]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, format)
            .expect("encode fixture");
        out.into_inner()
    }

    #[test]
    fn png_thumbnail_keeps_aspect_ratio_and_format() {
        let thumb = make_thumbnail(&encoded(400, 800, ImageFormat::Png)).unwrap();
        assert_eq!(thumb.format, ImageFormat::Png);
        assert_eq!((thumb.width, thumb.height), (100, 200));

        let decoded = image::load_from_memory(&thumb.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 200));
        assert_eq!(thumb.extension(), "png");
    }

    #[test]
    fn jpeg_thumbnail_stays_jpeg() {
        let thumb = make_thumbnail(&encoded(300, 100, ImageFormat::Jpeg)).unwrap();
        assert_eq!(thumb.format, ImageFormat::Jpeg);
        assert_eq!(image::guess_format(&thumb.bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(thumb.width, 600);
    }

    #[test]
    fn rejects_non_images() {
        assert!(matches!(
            make_thumbnail(b"definitely not an image"),
            Err(ThumbnailError::UnsupportedFormat)
        ));
    }

    #[test]
    fn scaled_width_never_collapses_to_zero() {
        assert_eq!(scaled_width(1, 5000), Some(1));
        assert_eq!(scaled_width(1000, 200), Some(1000));
    }

    #[test]
    fn scaled_width_is_bounded() {
        assert_eq!(scaled_width(20, 1), Some(MAX_THUMBNAIL_WIDTH));
        assert_eq!(scaled_width(21, 1), None);
        assert_eq!(scaled_width(u32::MAX, 1), None);
    }

    #[test]
    fn rejects_extreme_aspect_ratio_before_resizing() {
        let bytes = encoded(100_000, 1, ImageFormat::Png);
        assert!(matches!(
            make_thumbnail(&bytes),
            Err(ThumbnailError::TooWide {
                width: 100_000,
                height: 1
            })
        ));
    }
}
