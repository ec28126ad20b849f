//! Tables and arithmetic shared by the encoder and the decoder
//!
//! Everything here is read-only after initialisation and safe to use from
//! any number of threads:
//! - GF(256) log/antilog tables and Reed-Solomon generator polynomials
//! - Per-version block tables and capacity lookup ([`select_version`])
//! - Function pattern layout and the data-module placement order
//! - BCH codes for format and version information

/// BCH(15,5) format and BCH(18,6) version information codes
pub mod bch;
/// Galois field GF(256) arithmetic
pub mod gf256;
/// Reed-Solomon generator polynomials and EC codeword computation
pub mod generator;
/// Function pattern layout and zig-zag data placement order
pub mod layout;
/// Capacity lookup and version selection
pub mod negotiator;
/// Codeword and block tables per version and level
pub mod tables;

pub use negotiator::{capacity, select_version, select_version_in};
pub use tables::BlockLayout;
