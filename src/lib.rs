//! wifi_qr - QR symbol encoding and decoding with Wi-Fi credential payloads
//!
//! A pure Rust QR Model 2 codec (versions 1-40, levels L/M/Q/H):
//! - Build `WIFI:` payloads from network credentials and parse them back
//! - Encode text or bytes into a module grid with automatic mode, version
//!   and mask selection, then render it to pixels
//! - Decode camera frames: adaptive binarization, finder search, perspective
//!   sampling, Reed-Solomon correction and segment parsing
//!
//! ```
//! use wifi_qr::{ECLevel, Security, WiFiCredential, RenderOptions};
//!
//! let cred = WiFiCredential::new("Home", "hunter22", Security::Wpa);
//! let payload = wifi_qr::build_wifi_payload(&cred).unwrap();
//! let symbol = wifi_qr::encode(&payload, ECLevel::M).unwrap();
//! let frame = wifi_qr::render(&symbol, RenderOptions::with_scale(4));
//! assert_eq!(wifi_qr::decode_str(&frame).unwrap(), payload);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Galois field, generator polynomials, tables and version selection
pub mod capability;
/// Environment-driven tunables
pub mod config;
/// QR code decoding modules (error correction, format extraction, data modes)
pub mod decoder;
/// QR code detection modules (finder patterns, alignment, sampling)
pub mod detector;
/// QR symbol encoder
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, BitMatrix, SymbolMatrix, RasterImage, etc.)
pub mod models;
/// Payload formats carried in symbols
pub mod payload;
/// Symbol to pixel rendering
pub mod render;
/// Frame polling sessions
pub mod scanner;
/// Utility functions (grayscale, binarization, geometry)
pub mod utils;

pub use capability::select_version;
pub use decoder::{decode, decode_matrix, decode_str};
pub use encoder::{Encoder, encode, encode_bytes};
pub use error::{DecodeError, EncodeError, PayloadError};
pub use models::{
    BitMatrix, ECLevel, MaskPattern, Mode, PixelFormat, Point, QRCode, RasterImage, SymbolMatrix,
    Version,
};
pub use payload::{Security, WiFiCredential, build_wifi_payload, parse_wifi_payload};
pub use render::{RenderOptions, render, to_image};
pub use scanner::{FrameSource, PollOutcome, ScanSession, StillFrames};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_empty() {
        let frame = RasterImage::from_rgb(10, 10, vec![0u8; 300]).unwrap();
        assert_eq!(decode(&frame).unwrap_err(), DecodeError::NotFound);
    }

    #[test]
    fn test_rgb_frame_roundtrip() {
        let symbol = encode("rgb frame", ECLevel::Q).unwrap();
        let gray = render(&symbol, RenderOptions::with_scale(5));
        let rgb: Vec<u8> = gray.data().iter().flat_map(|&v| [v, v, v]).collect();
        let frame = RasterImage::from_rgb(gray.width(), gray.height(), rgb).unwrap();
        assert_eq!(decode_str(&frame).unwrap(), "rgb frame");
    }
}
