//! # wb-imaging
//! warble/crates/wb-plugins/wb-imaging/src/lib.rs
//! Image codec for feed payloads: base64 transport encoding plus the
//! raster transforms used for avatars and branding.
//!
//! The bytes-level codec is a lossless round-trip. The raster helpers
//! are deterministic pure functions. Decode failures are absorbed here
//! and only here — a bad icon is cosmetic, so callers get a placeholder
//! instead of an error.

use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;
use wb_core::error::{FeedError, Result};

/// Encodes raw image bytes into the transport text form.
pub fn encode_bytes(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Decodes the transport text form back into raw bytes.
/// Lossless inverse of [`encode_bytes`].
pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(text)
        .map_err(|e| FeedError::Decode(format!("invalid base64: {e}")))
}

/// Parses raw bytes into a raster image, guessing the format from the
/// payload's magic bytes.
pub fn decode_image_bytes(bytes: Vec<u8>) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FeedError::Decode(format!("unreadable image payload: {e}")))?
        .decode()
        .map_err(|e| FeedError::Decode(format!("malformed image payload: {e}")))
}

/// Parses an encoded payload into a raster image.
pub fn decode_image(text: &str) -> Result<DynamicImage> {
    decode_image_bytes(decode_bytes(text)?)
}

/// Like [`decode_image`], but substitutes `fallback` when the payload
/// is missing or malformed. Never fails.
pub fn decode_image_or(text: Option<&str>, fallback: &DynamicImage) -> DynamicImage {
    match text {
        Some(t) => match decode_image(t) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("icon decode failed, using placeholder: {e}");
                fallback.clone()
            }
        },
        None => fallback.clone(),
    }
}

/// Serializes an image as PNG and encodes it for transport.
pub fn encode_image(img: &DynamicImage) -> Result<String> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| FeedError::Decode(format!("png encode failed: {e}")))?;
    Ok(encode_bytes(&buf))
}

/// Resizes to `size` x `size` and masks to a circle with transparent
/// corners. Used for user avatars.
pub fn to_circular_icon(img: &DynamicImage, size: u32) -> DynamicImage {
    let src = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
    let center = size as f32 / 2.0;
    let radius_sq = center * center;

    let out = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if dx * dx + dy * dy <= radius_sq {
            *src.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba8(out)
}

/// Resizes to `size` x `size` and masks to a rounded rectangle.
/// Used for branding assets (e.g., the service logo).
pub fn to_rounded_image(img: &DynamicImage, size: u32, corner_radius: u32) -> DynamicImage {
    let src = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
    let r = (corner_radius.min(size / 2)) as f32;
    let edge = size as f32;

    let out = RgbaImage::from_fn(size, size, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        // Nearest corner-circle center, clamped to the rectangle core.
        let cx = px.clamp(r, edge - r);
        let cy = py.clamp(r, edge - r);
        let dx = px - cx;
        let dy = py - cy;
        if dx * dx + dy * dy <= r * r {
            *src.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    DynamicImage::ImageRgba8(out)
}

/// Flat grey stand-in used when no real icon is available.
pub fn placeholder(size: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba([200, 200, 200, 255])))
}
