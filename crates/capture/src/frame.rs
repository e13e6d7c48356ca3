//! Raw frame buffer and JPEG encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::error::CaptureError;

/// Raw RGB8 frame captured from a video source.
pub struct Frame {
    /// Tightly packed RGB8 pixels, `width * height * 3` bytes.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp_ms: i64,
}

/// Encode a raw frame as JPEG at the given quality (1-100).
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, CaptureError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::Failure(format!("JPEG encoding failed: {e}")))?;
    Ok(buf)
}
