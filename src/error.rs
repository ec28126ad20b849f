//! Error types for payload building, encoding and decoding

use crate::models::{ECLevel, Mode};
use thiserror::Error;

/// Invalid input to the payload builder or a malformed payload string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The network name is empty or whitespace only
    #[error("SSID must not be empty")]
    EmptySsid,
    /// WPA/WEP networks need a password
    #[error("a password is required for {0} networks")]
    MissingPassword(&'static str),
    /// The text is not a `WIFI:` payload
    #[error("malformed Wi-Fi payload: {0}")]
    Malformed(String),
}

/// Failure to turn a payload into a symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// No version in the allowed range can hold the payload
    #[error("payload of {len} characters does not fit any version in {mode} mode at level {ec_level}")]
    PayloadTooLarge {
        /// Payload length in characters (bytes for byte mode)
        len: usize,
        /// Mode the payload was encoded in
        mode: Mode,
        /// Requested error correction level
        ec_level: ECLevel,
    },
    /// A forced mode cannot represent a character of the payload
    #[error("byte 0x{byte:02X} at offset {offset} is not representable in {mode} mode")]
    UnsupportedCharacter {
        /// Forced mode
        mode: Mode,
        /// Offending byte
        byte: u8,
        /// Offset of the byte in the payload
        offset: usize,
    },
    /// The requested version bounds are empty
    #[error("invalid version range {min}..={max}")]
    InvalidVersionRange {
        /// Lower bound
        min: u8,
        /// Upper bound
        max: u8,
    },
}

/// Reasons a frame did not yield a payload
///
/// Variants are ordered by how far through the pipeline the decoder got, so
/// the furthest failure can be reported when several candidates were tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum DecodeError {
    /// No group of three finder patterns was located
    #[error("no QR code found")]
    NotFound,
    /// Neither copy of the format information decoded
    #[error("format information unreadable")]
    UnreadableFormatInfo,
    /// A Reed-Solomon block had more errors than it can correct
    #[error("uncorrectable error correction block")]
    UncorrectableBlock,
    /// Corrected codewords do not form a consistent segment stream
    #[error("corrected data failed consistency checks")]
    ChecksumMismatch,
}
