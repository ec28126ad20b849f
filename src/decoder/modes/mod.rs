//! QR code data mode decoders
//!
//! Each decoder reads `character_count` characters from the front of a bit
//! slice and returns the bytes produced with the number of bits consumed:
//! - Numeric: digits 0-9, three per 10 bits
//! - Alphanumeric: 0-9, A-Z, space and `$%*+-./:`, two per 11 bits
//! - Byte: raw 8-bit data

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

/// Big-endian value of `count` bits starting at `at`
pub(crate) fn read_bits(bits: &[bool], at: usize, count: usize) -> Option<u32> {
    let slice = bits.get(at..at.checked_add(count)?)?;
    Some(slice.iter().fold(0u32, |acc, &b| (acc << 1) | u32::from(b)))
}
