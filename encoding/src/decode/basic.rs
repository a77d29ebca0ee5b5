//! This module provides the primitive decoder of binary numbers,
//! in any of the byte orders classified by [`SwapCode`].

use crate::swap::SwapCode;
use byteordered::ByteOrdered;
use dcmio_core::Tag;
use std::io::Read;

type Result<T> = std::io::Result<T>;

/// A basic decoder of unsigned integers and tags
/// in the byte order of a decoding session.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BasicDecoder {
    swap: SwapCode,
}

impl BasicDecoder {
    /// Create a basic decoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        BasicDecoder { swap }
    }

    /// Retrieve the byte order expected by this decoder.
    pub fn swap_code(&self) -> SwapCode {
        self.swap
    }

    /// Decode an unsigned short value from the given source.
    pub fn decode_us<S>(&self, source: S) -> Result<u16>
    where
        S: Read,
    {
        ByteOrdered::runtime(source, self.swap.endianness()).read_u16()
    }

    /// Decode an unsigned long value from the given source.
    pub fn decode_ul<S>(&self, mut source: S) -> Result<u32>
    where
        S: Read,
    {
        match self.swap {
            SwapCode::Unknown | SwapCode::LittleEndian | SwapCode::BigEndian => {
                ByteOrdered::runtime(source, self.swap.endianness()).read_u32()
            }
            SwapCode::BadLittleEndian | SwapCode::BadBigEndian => {
                let mut buf = [0u8; 4];
                source.read_exact(&mut buf)?;
                Ok(self.swap.read_u32(&buf))
            }
        }
    }

    /// Decode a DICOM attribute tag from the given source:
    /// two unsigned short values.
    pub fn decode_tag<S>(&self, mut source: S) -> Result<Tag>
    where
        S: Read,
    {
        let mut buf = [0u8; 4];
        source.read_exact(&mut buf)?;
        Ok(Tag(
            self.swap.read_u16(&buf[0..2]),
            self.swap.read_u16(&buf[2..4]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::BasicDecoder;
    use crate::swap::SwapCode;
    use dcmio_core::Tag;

    #[test]
    fn read_tags_in_each_order() {
        let le = BasicDecoder::new(SwapCode::LittleEndian);
        let be = BasicDecoder::new(SwapCode::BigEndian);
        let bad_be = BasicDecoder::new(SwapCode::BadBigEndian);
        assert_eq!(le.decode_tag(&[0x08, 0x00, 0x16, 0x00][..]).unwrap(), Tag(0x0008, 0x0016));
        assert_eq!(be.decode_tag(&[0x00, 0x08, 0x00, 0x16][..]).unwrap(), Tag(0x0008, 0x0016));
        assert_eq!(bad_be.decode_tag(&[0x00, 0x08, 0x00, 0x16][..]).unwrap(), Tag(0x0008, 0x0016));
    }

    #[test]
    fn read_lengths_in_each_order() {
        let data = [0x00, 0x00, 0x01, 0x02];
        assert_eq!(BasicDecoder::new(SwapCode::LittleEndian).decode_ul(&data[..]).unwrap(), 0x0201_0000);
        assert_eq!(BasicDecoder::new(SwapCode::BigEndian).decode_ul(&data[..]).unwrap(), 0x0000_0102);
        assert_eq!(BasicDecoder::new(SwapCode::BadLittleEndian).decode_ul(&data[..]).unwrap(), 0x0000_0201);
        assert_eq!(BasicDecoder::new(SwapCode::BadBigEndian).decode_ul(&data[..]).unwrap(), 0x0102_0000);
        // unknown reads as little endian
        assert_eq!(BasicDecoder::default().decode_us(&[0x10, 0x00][..]).unwrap(), 0x10);
    }

    #[test]
    fn short_source() {
        let le = BasicDecoder::new(SwapCode::LittleEndian);
        let err = le.decode_ul(&[0x01, 0x02][..]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
