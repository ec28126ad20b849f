//! Image helpers for the decoder
//!
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (adaptive local mean, Otsu and fixed threshold)
//! - Geometry (perspective transforms)

/// Luminance to dark/light modules
pub mod binarization;
pub mod geometry;
pub mod grayscale;
