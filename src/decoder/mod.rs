//! QR code decoding modules
//!
//! Everything after detection lives here:
//! - Format and version information extraction
//! - Unmasking and codeword extraction in placement order
//! - Reed-Solomon error correction per block
//! - Segment decoding (numeric, alphanumeric, byte)
//!
//! [`decode`] runs the whole frame pipeline: luminance, adaptive
//! binarization with an Otsu fallback, finder search, sampling and payload
//! extraction.

/// Codeword extraction from an unmasked module grid
pub mod bitstream;
/// Format information extraction (mask pattern, EC level) and version blocks
pub mod format;
/// Data mode decoders (numeric, alphanumeric, byte)
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR code unmasking (removes mask patterns)
pub mod unmask;

use crate::error::DecodeError;
use crate::models::{BitMatrix, QRCode, RasterImage};
use crate::utils::binarization::{binarize, otsu_binarize};
use qr_decoder::QrDecoder;

type Binarizer = fn(&[u8], usize, usize) -> BitMatrix;

/// Decode the first QR symbol in a frame.
///
/// Adaptive thresholding is tried first and a global Otsu threshold second.
/// When neither yields a payload the error names the furthest stage any
/// candidate reached.
pub fn decode(frame: &RasterImage) -> Result<QRCode, DecodeError> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::NotFound);
    }
    let gray = frame.luminance();

    let binarizers: [(&str, Binarizer); 2] = [("adaptive", binarize), ("otsu", otsu_binarize)];
    let mut furthest = DecodeError::NotFound;
    for (name, binarizer) in binarizers {
        let matrix = binarizer(&gray, width, height);
        match QrDecoder::decode_binary(&matrix) {
            Ok(qr) => return Ok(qr),
            Err(e) => {
                tracing::debug!(binarizer = name, error = %e, "no payload");
                furthest = furthest.max(e);
            }
        }
    }
    Err(furthest)
}

/// Decode a frame and keep only the content string
pub fn decode_str(frame: &RasterImage) -> Result<String, DecodeError> {
    decode(frame).map(|qr| qr.content)
}

/// Decode a module grid directly: one entry per module, no quiet zone,
/// upright or mirrored
pub fn decode_matrix(grid: &BitMatrix) -> Result<QRCode, DecodeError> {
    QrDecoder::decode_grid(grid)
}
