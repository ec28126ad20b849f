//! Version selection against the capacity tables

use super::tables::BlockLayout;
use crate::error::EncodeError;
use crate::models::{ECLevel, Mode, Version};

/// Maximum payload length (characters, or bytes in byte mode) a single
/// segment can carry at this version and level
pub fn capacity(version: Version, mode: Mode, ec_level: ECLevel) -> usize {
    let data_bits = BlockLayout::new(version, ec_level).data_codewords() * 8;
    let count_bits = mode.char_count_bits(version);
    let Some(available) = data_bits.checked_sub(4 + count_bits) else {
        return 0;
    };
    let chars = match mode {
        Mode::Numeric => {
            let rem = available % 10;
            available / 10 * 3
                + if rem >= 7 {
                    2
                } else if rem >= 4 {
                    1
                } else {
                    0
                }
        }
        Mode::Alphanumeric => available / 11 * 2 + usize::from(available % 11 >= 6),
        Mode::Byte => available / 8,
    };
    chars.min((1usize << count_bits) - 1)
}

/// Smallest version in `min..=max` whose capacity holds `payload_len`
pub fn select_version_in(
    payload_len: usize,
    mode: Mode,
    ec_level: ECLevel,
    min: Version,
    max: Version,
) -> Result<Version, EncodeError> {
    if min > max {
        return Err(EncodeError::InvalidVersionRange {
            min: min.number(),
            max: max.number(),
        });
    }
    Version::range(min, max)
        .find(|&v| capacity(v, mode, ec_level) >= payload_len)
        .ok_or(EncodeError::PayloadTooLarge {
            len: payload_len,
            mode,
            ec_level,
        })
}

/// Smallest version (1-40) whose capacity holds `payload_len`
pub fn select_version(
    payload_len: usize,
    mode: Mode,
    ec_level: ECLevel,
) -> Result<Version, EncodeError> {
    select_version_in(payload_len, mode, ec_level, Version::MIN, Version::MAX)
}
