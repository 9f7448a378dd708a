//! Decoding of image payloads into intensity grids.
//!
//! The drawing page posts its canvas as a data URL
//! (`data:image/png;base64,....`); bare base64 is accepted as well. Any format
//! the `image` crate is built with (PNG/JPEG/BMP/GIF) decodes, and the result
//! is converted to 8-bit luma with alpha discarded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::GrayImage;

use crate::error::DecodeError;
use crate::grid::IntensityGrid;

/// Decodes a base64 image payload, with or without a data-URL header, to a
/// grayscale grid.
///
/// With a header, the base64 is the text between the first and second
/// commas; anything after a second comma is ignored.
pub fn decode_payload(payload: &str) -> Result<IntensityGrid, DecodeError> {
    let payload = payload.trim();
    let mut parts = payload.split(',');
    let head = parts.next().unwrap_or_default();
    let encoded = parts.next().unwrap_or(head);
    if encoded.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    let bytes = STANDARD.decode(encoded)?;
    decode_image_bytes(&bytes)
}

/// Decodes raw encoded image bytes to a grayscale grid.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<IntensityGrid, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    let img = image::load_from_memory(bytes)?;
    grid_from_luma8(&img.to_luma8())
}

/// Builds a grid from an 8-bit grayscale image, one sample per pixel.
pub fn grid_from_luma8(img: &GrayImage) -> Result<IntensityGrid, DecodeError> {
    let (width, height) = img.dimensions();
    let data = img.pixels().map(|p| f64::from(p.0[0])).collect();
    Ok(IntensityGrid::new(height as usize, width as usize, data)?)
}
