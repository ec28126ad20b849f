/// Packed bit grid
pub mod matrix;
/// Image-space points
pub mod point;
/// Decode result and the symbol parameters it carries
pub mod qr_code;
/// Captured frames
pub mod raster;
/// Encoded module grid
pub mod symbol;

pub use matrix::BitMatrix;
pub use point::Point;
pub use qr_code::{ECLevel, MaskPattern, Mode, QRCode, Version};
pub use raster::{PixelFormat, RasterImage};
pub use symbol::SymbolMatrix;
