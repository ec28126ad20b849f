use crate::capability::tables::BlockLayout;
use crate::decoder::modes::read_bits;
use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, numeric::NumericDecoder,
};
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::error::DecodeError;
use crate::models::{Mode, Version};

const MODE_TERMINATOR: u32 = 0b0000;
const MODE_NUMERIC: u32 = 0b0001;
const MODE_ALPHANUMERIC: u32 = 0b0010;
const MODE_STRUCTURED_APPEND: u32 = 0b0011;
const MODE_BYTE: u32 = 0b0100;
const MODE_FNC1_FIRST: u32 = 0b0101;
const MODE_ECI: u32 = 0b0111;
const MODE_FNC1_SECOND: u32 = 0b1001;

/// Split interleaved codewords back into blocks, correct each and
/// concatenate the data codewords
pub(super) fn deinterleave_and_correct(
    codewords: &[u8],
    layout: &BlockLayout,
) -> Result<Vec<u8>, DecodeError> {
    if codewords.len() < layout.total_codewords() {
        return Err(DecodeError::UncorrectableBlock);
    }

    let mut blocks: Vec<Vec<u8>> = (0..layout.num_blocks)
        .map(|b| Vec::with_capacity(layout.data_len(b) + layout.ecc_per_block))
        .collect();
    let mut iter = codewords.iter().copied();
    for column in 0..=layout.short_data_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if column < layout.data_len(b) {
                block.extend(iter.next());
            }
        }
    }
    for _ in 0..layout.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(iter.next());
        }
    }

    let decoder = ReedSolomonDecoder::new(layout.ecc_per_block);
    let mut data = Vec::with_capacity(layout.data_codewords());
    for (b, block) in blocks.iter_mut().enumerate() {
        match decoder.decode(block) {
            Ok(0) => {}
            Ok(corrected) => tracing::debug!(block = b, corrected, "corrected codewords"),
            Err(e) => {
                tracing::debug!(block = b, error = %e, "block uncorrectable");
                return Err(DecodeError::UncorrectableBlock);
            }
        }
        data.extend_from_slice(&block[..layout.data_len(b)]);
    }
    Ok(data)
}

/// Parse the segment stream of the corrected data codewords into bytes.
/// ECI, structured-append and FNC1 headers are read and skipped.
pub(super) fn parse_segments(data: &[u8], version: Version) -> Result<Vec<u8>, DecodeError> {
    let bits: Vec<bool> = data
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();
    let mut pos = 0;
    let mut out = Vec::new();

    // Fewer than four bits left is an implicit terminator
    while let Some(indicator) = read_bits(&bits, pos, 4) {
        pos += 4;
        let mode = match indicator {
            MODE_TERMINATOR => break,
            MODE_NUMERIC => Mode::Numeric,
            MODE_ALPHANUMERIC => Mode::Alphanumeric,
            MODE_BYTE => Mode::Byte,
            MODE_ECI => {
                pos += eci_designator_len(&bits, pos)?;
                continue;
            }
            MODE_STRUCTURED_APPEND => {
                // Sequence index, total and parity
                read_bits(&bits, pos, 16).ok_or(DecodeError::ChecksumMismatch)?;
                pos += 16;
                continue;
            }
            MODE_FNC1_FIRST => continue,
            MODE_FNC1_SECOND => {
                read_bits(&bits, pos, 8).ok_or(DecodeError::ChecksumMismatch)?;
                pos += 8;
                continue;
            }
            other => {
                tracing::debug!(indicator = other, "unsupported segment mode");
                return Err(DecodeError::ChecksumMismatch);
            }
        };

        let count_bits = mode.char_count_bits(version);
        let count =
            read_bits(&bits, pos, count_bits).ok_or(DecodeError::ChecksumMismatch)? as usize;
        pos += count_bits;

        let rest = &bits[pos..];
        let decoded = match mode {
            Mode::Numeric => NumericDecoder::decode(rest, count),
            Mode::Alphanumeric => AlphanumericDecoder::decode(rest, count),
            Mode::Byte => ByteDecoder::decode(rest, count),
        };
        let (bytes, used) = decoded.ok_or(DecodeError::ChecksumMismatch)?;
        out.extend(bytes);
        pos += used;
    }

    Ok(out)
}

/// ECI assignment numbers take 8, 16 or 24 bits depending on the leading bits
fn eci_designator_len(bits: &[bool], pos: usize) -> Result<usize, DecodeError> {
    let first = read_bits(bits, pos, 8).ok_or(DecodeError::ChecksumMismatch)?;
    let len = if first & 0x80 == 0 {
        8
    } else if first & 0xC0 == 0x80 {
        16
    } else if first & 0xE0 == 0xC0 {
        24
    } else {
        return Err(DecodeError::ChecksumMismatch);
    };
    read_bits(bits, pos, len).ok_or(DecodeError::ChecksumMismatch)?;
    Ok(len)
}

/// UTF-8 when valid, otherwise ISO-8859-1
pub(super) fn bytes_to_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::bitstream::BitBuffer;
    use crate::encoder::blocks::add_ec_and_interleave;
    use crate::models::ECLevel;

    #[test]
    fn test_deinterleave_roundtrip_with_errors() {
        let v5 = Version::new(5).unwrap();
        let layout = BlockLayout::new(v5, ECLevel::Q);
        let data: Vec<u8> = (0..62u8).collect();
        let mut codewords = add_ec_and_interleave(&data, &layout);
        // Damage 4 codewords of the first block (interleaved stride 4)
        for i in [0, 4, 8, 12] {
            codewords[i] ^= 0xFF;
        }
        assert_eq!(deinterleave_and_correct(&codewords, &layout), Ok(data));
    }

    #[test]
    fn test_too_many_errors_in_one_block() {
        let layout = BlockLayout::new(Version::MIN, ECLevel::L);
        let data = vec![0x40; 19];
        let mut codewords = add_ec_and_interleave(&data, &layout);
        for cw in codewords.iter_mut().take(4) {
            *cw ^= 0x0F;
        }
        assert_eq!(
            deinterleave_and_correct(&codewords, &layout),
            Err(DecodeError::UncorrectableBlock)
        );
    }

    #[test]
    fn test_parse_mixed_segments() {
        let mut buf = BitBuffer::new();
        // ECI 26 (UTF-8), then byte "hi", then numeric "42"
        buf.append_bits(MODE_ECI, 4);
        buf.append_bits(26, 8);
        buf.append_bits(MODE_BYTE, 4);
        buf.append_bits(2, 8);
        buf.append_bits(u32::from(b'h'), 8);
        buf.append_bits(u32::from(b'i'), 8);
        buf.append_bits(MODE_NUMERIC, 4);
        buf.append_bits(2, 10);
        buf.append_bits(42, 7);
        buf.append_bits(0, 4);
        let parsed = parse_segments(&buf.to_codewords(), Version::MIN).unwrap();
        assert_eq!(parsed, b"hi42");
    }

    #[test]
    fn test_structured_append_is_skipped() {
        let mut buf = BitBuffer::new();
        buf.append_bits(MODE_STRUCTURED_APPEND, 4);
        buf.append_bits(0x1F, 8);
        buf.append_bits(0xA5, 8);
        buf.append_bits(MODE_ALPHANUMERIC, 4);
        buf.append_bits(1, 9);
        buf.append_bits(10, 6);
        let parsed = parse_segments(&buf.to_codewords(), Version::MIN).unwrap();
        assert_eq!(parsed, b"A");
    }

    #[test]
    fn test_bad_stream_is_checksum_mismatch() {
        // Kanji mode indicator
        assert_eq!(
            parse_segments(&[0x80, 0x00], Version::MIN),
            Err(DecodeError::ChecksumMismatch)
        );
        // Byte count longer than the data
        assert_eq!(
            parse_segments(&[0x40, 0xF0, 0x00], Version::MIN),
            Err(DecodeError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(bytes_to_text("café".as_bytes()), "café");
        assert_eq!(bytes_to_text(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }
}
