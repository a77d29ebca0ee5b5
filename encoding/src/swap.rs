//! Byte order classification of a decoding session.
//!
//! Besides the two regular byte orders, some broken encoders
//! produced streams in which the 16-bit halves of 32-bit values
//! are out of place. These are named after the position of each
//! byte in the stream, where byte 1 is the least significant:
//!
//! | code | layout |
//! |------|--------|
//! | [`LittleEndian`](SwapCode::LittleEndian) | 1234 |
//! | [`BigEndian`](SwapCode::BigEndian) | 4321 |
//! | [`BadLittleEndian`](SwapCode::BadLittleEndian) | 3412 |
//! | [`BadBigEndian`](SwapCode::BadBigEndian) | 2143 |

use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use std::fmt;

/// The byte order of the values in a stream.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum SwapCode {
    /// Not determined yet. Values are read as little endian.
    Unknown,
    /// 1234
    LittleEndian,
    /// 4321
    BigEndian,
    /// 3412: 16-bit words in big endian order,
    /// bytes within each word in little endian order
    BadLittleEndian,
    /// 2143: 16-bit words in little endian order,
    /// bytes within each word in big endian order
    BadBigEndian,
}

impl Default for SwapCode {
    fn default() -> Self {
        SwapCode::Unknown
    }
}

impl fmt::Display for SwapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SwapCode::Unknown => "Unknown",
            SwapCode::LittleEndian => "LittleEndian",
            SwapCode::BigEndian => "BigEndian",
            SwapCode::BadLittleEndian => "BadLittleEndian",
            SwapCode::BadBigEndian => "BadBigEndian",
        })
    }
}

impl From<Endianness> for SwapCode {
    fn from(e: Endianness) -> Self {
        match e {
            Endianness::Little => SwapCode::LittleEndian,
            Endianness::Big => SwapCode::BigEndian,
        }
    }
}

impl SwapCode {
    /// Classify the byte order of a stream from the value length
    /// of a group length element, read as a little endian 32-bit value.
    ///
    /// A group length element always has a value length of 4,
    /// so each byte order leaves a distinct pattern.
    /// Returns `None` for any other pattern.
    pub fn from_group_length_probe(raw: u32) -> Option<SwapCode> {
        match raw {
            0x0004_0000 => Some(SwapCode::BadLittleEndian),
            0x0400_0000 => Some(SwapCode::BigEndian),
            0x0000_0400 => Some(SwapCode::BadBigEndian),
            0x0000_0004 => Some(SwapCode::LittleEndian),
            _ => None,
        }
    }

    /// The byte order of the running machine.
    pub fn host() -> SwapCode {
        if cfg!(target_endian = "big") {
            SwapCode::BigEndian
        } else {
            SwapCode::LittleEndian
        }
    }

    /// Whether values in this byte order
    /// are already in the byte order of the running machine.
    /// `Unknown` is considered native.
    pub fn is_native(self) -> bool {
        self == SwapCode::Unknown || self == SwapCode::host()
    }

    /// The regular endianness of the 16-bit values in this byte order.
    pub fn endianness(self) -> Endianness {
        match self {
            SwapCode::Unknown | SwapCode::LittleEndian | SwapCode::BadLittleEndian => {
                Endianness::Little
            }
            SwapCode::BigEndian | SwapCode::BadBigEndian => Endianness::Big,
        }
    }

    /// Interpret two bytes as a 16-bit unsigned integer in this byte order.
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self.endianness() {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }

    /// Interpret four bytes as a 32-bit unsigned integer in this byte order.
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            SwapCode::Unknown | SwapCode::LittleEndian => LittleEndian::read_u32(buf),
            SwapCode::BigEndian => BigEndian::read_u32(buf),
            SwapCode::BadLittleEndian => LittleEndian::read_u32(buf).rotate_left(16),
            SwapCode::BadBigEndian => {
                u32::from(BigEndian::read_u16(&buf[0..2]))
                    | u32::from(BigEndian::read_u16(&buf[2..4])) << 16
            }
        }
    }

    /// Write a 16-bit unsigned integer in this byte order.
    pub fn write_u16(self, buf: &mut [u8], value: u16) {
        match self.endianness() {
            Endianness::Little => LittleEndian::write_u16(buf, value),
            Endianness::Big => BigEndian::write_u16(buf, value),
        }
    }

    /// Write a 32-bit unsigned integer in this byte order.
    pub fn write_u32(self, buf: &mut [u8], value: u32) {
        match self {
            SwapCode::Unknown | SwapCode::LittleEndian => LittleEndian::write_u32(buf, value),
            SwapCode::BigEndian => BigEndian::write_u32(buf, value),
            SwapCode::BadLittleEndian => LittleEndian::write_u32(buf, value.rotate_left(16)),
            SwapCode::BadBigEndian => {
                BigEndian::write_u16(&mut buf[0..2], value as u16);
                BigEndian::write_u16(&mut buf[2..4], (value >> 16) as u16);
            }
        }
    }

    /// Convert an array of values of the given width (2 or 4 bytes)
    /// from this byte order into the byte order of the running machine.
    ///
    /// Trailing bytes which do not fill a whole slot are left untouched,
    /// and so are buffers of any other width.
    pub fn to_host(self, data: &mut [u8], width: u8) {
        match width {
            2 => {
                for slot in data.chunks_exact_mut(2) {
                    let v = self.read_u16(slot);
                    slot.copy_from_slice(&v.to_ne_bytes());
                }
            }
            4 => {
                for slot in data.chunks_exact_mut(4) {
                    let v = self.read_u32(slot);
                    slot.copy_from_slice(&v.to_ne_bytes());
                }
            }
            _ => {}
        }
    }

    /// Convert an array of values of the given width (2 or 4 bytes)
    /// from the byte order of the running machine into this byte order.
    ///
    /// This is the inverse of [`to_host`](SwapCode::to_host).
    pub fn from_host(self, data: &mut [u8], width: u8) {
        match width {
            2 => {
                for slot in data.chunks_exact_mut(2) {
                    let v = u16::from_ne_bytes([slot[0], slot[1]]);
                    self.write_u16(slot, v);
                }
            }
            4 => {
                for slot in data.chunks_exact_mut(4) {
                    let v = u32::from_ne_bytes([slot[0], slot[1], slot[2], slot[3]]);
                    self.write_u32(slot, v);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SwapCode;
    use rstest::rstest;

    #[rstest]
    #[case([0x04, 0x00, 0x00, 0x00], SwapCode::LittleEndian)]
    #[case([0x00, 0x00, 0x00, 0x04], SwapCode::BigEndian)]
    #[case([0x00, 0x00, 0x04, 0x00], SwapCode::BadLittleEndian)]
    #[case([0x00, 0x04, 0x00, 0x00], SwapCode::BadBigEndian)]
    fn group_length_probe(#[case] raw: [u8; 4], #[case] expected: SwapCode) {
        let code = SwapCode::from_group_length_probe(u32::from_le_bytes(raw));
        assert_eq!(code, Some(expected));
        // each code reads its own pattern back as 4
        assert_eq!(expected.read_u32(&raw), 4);
    }

    #[test]
    fn unknown_group_length_pattern() {
        assert_eq!(SwapCode::from_group_length_probe(0x0000_0008), None);
        assert_eq!(SwapCode::from_group_length_probe(0x0102_0304), None);
    }

    #[rstest]
    #[case(SwapCode::LittleEndian, [0x01, 0x02, 0x03, 0x04])]
    #[case(SwapCode::BigEndian, [0x04, 0x03, 0x02, 0x01])]
    #[case(SwapCode::BadLittleEndian, [0x03, 0x04, 0x01, 0x02])]
    #[case(SwapCode::BadBigEndian, [0x02, 0x01, 0x04, 0x03])]
    fn layouts(#[case] code: SwapCode, #[case] stored: [u8; 4]) {
        assert_eq!(code.read_u32(&stored), 0x0403_0201);
        let mut buf = [0; 4];
        code.write_u32(&mut buf, 0x0403_0201);
        assert_eq!(buf, stored);
    }

    #[rstest]
    #[case(SwapCode::LittleEndian)]
    #[case(SwapCode::BigEndian)]
    #[case(SwapCode::BadLittleEndian)]
    #[case(SwapCode::BadBigEndian)]
    fn host_conversion_is_reversible(#[case] code: SwapCode) {
        let original: Vec<u8> = (1..=12).collect();
        for &width in &[2, 4] {
            let mut data = original.clone();
            code.to_host(&mut data, width);
            code.from_host(&mut data, width);
            assert_eq!(data, original, "{} with width {}", code, width);
        }
    }

    #[test]
    fn big_endian_to_host() {
        let mut data = vec![0x00, 0x01, 0x00, 0x02, 0xAA];
        SwapCode::BigEndian.to_host(&mut data, 2);
        assert_eq!(u16::from_ne_bytes([data[0], data[1]]), 1);
        assert_eq!(u16::from_ne_bytes([data[2], data[3]]), 2);
        // incomplete slot untouched
        assert_eq!(data[4], 0xAA);

        let mut data = vec![0x00, 0x00, 0x01, 0x02];
        SwapCode::BigEndian.to_host(&mut data, 4);
        assert_eq!(u32::from_ne_bytes([data[0], data[1], data[2], data[3]]), 0x0102);
    }
}
