//! QR code detection
//!
//! Locating a symbol in a binarized frame:
//! - Finder pattern detection (the three square markers)
//! - Alignment pattern detection near the bottom-right corner (version 2+)
//! - Grouping finders into triples, perspective transform and grid sampling

/// Alignment pattern detection for QR versions 2+
pub mod alignment;
/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
/// Finder grouping, perspective transform and sample grid extraction
pub mod transform;
