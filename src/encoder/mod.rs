//! QR symbol encoder
//!
//! Turns a payload into a [`SymbolMatrix`]: mode selection, smallest fitting
//! version, data codewords with terminator and padding, Reed-Solomon blocks,
//! zig-zag placement and mask selection.

/// Bit accumulator for data codewords
pub mod bitstream;
/// Block split, EC computation and interleaving
pub mod blocks;
/// Penalty scoring and mask selection
pub mod mask;
/// Codeword placement into the module grid
pub mod placement;
/// Mode classification and segment encoding
pub mod segment;

use crate::capability::layout::FunctionLayout;
use crate::capability::negotiator::select_version_in;
use crate::capability::tables::BlockLayout;
use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, Mode, SymbolMatrix, Version};
use bitstream::BitBuffer;
use segment::Segment;

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Encoder settings. The defaults pick the mode, version and mask
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    ec_level: ECLevel,
    mode: Option<Mode>,
    mask: Option<MaskPattern>,
    min_version: Version,
    max_version: Version,
}

impl Encoder {
    /// Encoder at the given error correction level
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            mode: None,
            mask: None,
            min_version: Version::MIN,
            max_version: Version::MAX,
        }
    }

    /// Force a segment mode instead of picking the most compact one
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Force a mask pattern instead of the lowest-penalty one
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Restrict the versions considered, inclusive on both ends
    pub fn with_version_range(mut self, min: Version, max: Version) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    /// Encode a text payload (its UTF-8 bytes)
    pub fn encode(&self, payload: &str) -> Result<SymbolMatrix, EncodeError> {
        self.encode_bytes(payload.as_bytes())
    }

    /// Encode raw bytes
    pub fn encode_bytes(&self, data: &[u8]) -> Result<SymbolMatrix, EncodeError> {
        let segment = match self.mode {
            Some(mode) => Segment::with_mode(data, mode)?,
            None => Segment::auto(data),
        };
        let version = select_version_in(
            segment.char_count(),
            segment.mode(),
            self.ec_level,
            self.min_version,
            self.max_version,
        )?;

        let blocks = BlockLayout::new(version, self.ec_level);
        let data_codewords = build_data_codewords(&segment, version, blocks.data_codewords());
        let codewords = blocks::add_ec_and_interleave(&data_codewords, &blocks);

        let layout = FunctionLayout::new(version);
        let positions = layout.data_positions();
        let (mut modules, function) = layout.into_parts();
        placement::place_codewords(&mut modules, &positions, &codewords);

        let (mask, modules) = match self.mask {
            Some(mask) => mask::apply_with_format(&modules, &function, self.ec_level, mask),
            None => mask::choose_mask(&modules, &function, self.ec_level),
        };

        tracing::debug!(
            version = version.number(),
            mode = %segment.mode(),
            ec_level = %self.ec_level,
            mask = mask.bits(),
            len = data.len(),
            "encoded symbol"
        );
        Ok(SymbolMatrix::from_parts(
            version,
            self.ec_level,
            mask,
            modules,
            function,
        ))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(ECLevel::M)
    }
}

/// Segment bits, terminator, zero fill to a byte boundary, then alternating
/// pad codewords up to `capacity` bytes
fn build_data_codewords(segment: &Segment<'_>, version: Version, capacity: usize) -> Vec<u8> {
    let capacity_bits = capacity * 8;
    let mut buf = BitBuffer::with_capacity(capacity_bits);
    segment.write(version, &mut buf);
    debug_assert!(buf.len() <= capacity_bits);

    let terminator = (capacity_bits - buf.len()).min(4);
    buf.append_bits(0, terminator);
    buf.append_bits(0, (8 - buf.len() % 8) % 8);

    let mut codewords = buf.to_codewords();
    let missing = capacity.saturating_sub(codewords.len());
    codewords.extend(PAD_BYTES.iter().cycle().take(missing));
    codewords
}

/// Encode `payload` at `ec_level` with automatic mode, version and mask
pub fn encode(payload: &str, ec_level: ECLevel) -> Result<SymbolMatrix, EncodeError> {
    Encoder::new(ec_level).encode(payload)
}

/// Encode raw bytes at `ec_level` with automatic mode, version and mask
pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<SymbolMatrix, EncodeError> {
    Encoder::new(ec_level).encode_bytes(data)
}
