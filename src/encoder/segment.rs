//! Mode classification and segment bit encoding

use super::bitstream::BitBuffer;
use crate::capability::tables::ALPHANUMERIC_CHARSET;
use crate::error::EncodeError;
use crate::models::{Mode, Version};

/// Value of a byte in the alphanumeric charset
pub fn alphanumeric_value(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|p| p as u32)
}

fn representable(byte: u8, mode: Mode) -> bool {
    match mode {
        Mode::Numeric => byte.is_ascii_digit(),
        Mode::Alphanumeric => alphanumeric_value(byte).is_some(),
        Mode::Byte => true,
    }
}

/// Most compact single mode able to carry `data`. Empty input is byte mode.
pub fn classify(data: &[u8]) -> Mode {
    if data.is_empty() {
        Mode::Byte
    } else if data.iter().all(|&b| representable(b, Mode::Numeric)) {
        Mode::Numeric
    } else if data.iter().all(|&b| representable(b, Mode::Alphanumeric)) {
        Mode::Alphanumeric
    } else {
        Mode::Byte
    }
}

/// One segment: a mode and the bytes it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    mode: Mode,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    /// Segment in the most compact mode for `data`
    pub fn auto(data: &'a [u8]) -> Self {
        Self {
            mode: classify(data),
            data,
        }
    }

    /// Segment in a forced mode; fails on the first byte the mode cannot carry
    pub fn with_mode(data: &'a [u8], mode: Mode) -> Result<Self, EncodeError> {
        if let Some(offset) = data.iter().position(|&b| !representable(b, mode)) {
            return Err(EncodeError::UnsupportedCharacter {
                mode,
                byte: data[offset],
                offset,
            });
        }
        Ok(Self { mode, data })
    }

    /// Mode the segment is packed in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Character count as written in the count indicator
    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    /// Bits taken by the header and data at `version`
    pub fn bit_len(&self, version: Version) -> usize {
        let n = self.data.len();
        let data_bits = match self.mode {
            Mode::Numeric => n / 3 * 10 + [0, 4, 7][n % 3],
            Mode::Alphanumeric => n / 2 * 11 + (n % 2) * 6,
            Mode::Byte => n * 8,
        };
        4 + self.mode.char_count_bits(version) + data_bits
    }

    /// Write mode indicator, count and data
    pub fn write(&self, version: Version, buf: &mut BitBuffer) {
        buf.append_bits(self.mode.indicator(), 4);
        buf.append_bits(
            self.char_count() as u32,
            self.mode.char_count_bits(version),
        );
        match self.mode {
            Mode::Numeric => {
                for group in self.data.chunks(3) {
                    let value = group
                        .iter()
                        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
                    buf.append_bits(value, group.len() * 3 + 1);
                }
            }
            Mode::Alphanumeric => {
                for pair in self.data.chunks(2) {
                    let values: Vec<u32> = pair
                        .iter()
                        .filter_map(|&b| alphanumeric_value(b))
                        .collect();
                    match values.as_slice() {
                        [a, b] => buf.append_bits(a * 45 + b, 11),
                        [a] => buf.append_bits(*a, 6),
                        _ => {}
                    }
                }
            }
            Mode::Byte => {
                for &b in self.data {
                    buf.append_bits(u32::from(b), 8);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1() -> Version {
        Version::MIN
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(b"0123456789"), Mode::Numeric);
        assert_eq!(classify(b"HELLO WORLD"), Mode::Alphanumeric);
        assert_eq!(classify(b"hello"), Mode::Byte);
        assert_eq!(classify(b"WIFI:S:x;;"), Mode::Byte);
        assert_eq!(classify(b""), Mode::Byte);
    }

    #[test]
    fn test_numeric_bits() {
        // "01234567": 0001 0000001000 000000001100 ... from the standard's example
        let seg = Segment::auto(b"01234567");
        let mut buf = BitBuffer::new();
        seg.write(v1(), &mut buf);
        assert_eq!(buf.len(), seg.bit_len(v1()));
        assert_eq!(buf.len(), 41);
        assert_eq!(&buf.to_codewords()[..5], &[0x10, 0x20, 0x0C, 0x56, 0x61]);
    }

    #[test]
    fn test_alphanumeric_bits() {
        // "AC-42": AC = 10*45+12 = 462, -4 = 41*45+4 = 1849, 2 = 2
        let seg = Segment::auto(b"AC-42");
        let mut buf = BitBuffer::new();
        seg.write(v1(), &mut buf);
        let mut expected = BitBuffer::new();
        expected.append_bits(0b0010, 4);
        expected.append_bits(5, 9);
        expected.append_bits(462, 11);
        expected.append_bits(1849, 11);
        expected.append_bits(2, 6);
        assert_eq!(buf, expected);
        assert_eq!(buf.len(), seg.bit_len(v1()));
    }

    #[test]
    fn test_forced_mode_rejects_character() {
        let err = Segment::with_mode(b"12a4", Mode::Numeric).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnsupportedCharacter {
                mode: Mode::Numeric,
                byte: b'a',
                offset: 2
            }
        );
        assert!(Segment::with_mode(b"1234", Mode::Byte).is_ok());
    }
}
