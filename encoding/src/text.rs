//! Text decoding and encoding for the default character repertoire,
//! which is all that identifiers such as UIDs and transfer syntax
//! names require.

use snafu::{Backtrace, Snafu};

/// An error type for text encoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeTextError {
    /// The character cannot be represented in the repertoire.
    #[snafu(display("Character {:?} at position {} is not representable", character, position))]
    Unrepresentable {
        /// the offending character
        character: char,
        /// its character position in the text
        position: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

/// An error type for text decoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeTextError {
    /// A byte outside of the repertoire.
    #[snafu(display("Byte {:#04X} at position {} is not valid text", byte, position))]
    InvalidByte {
        /// the offending byte
        byte: u8,
        /// its position in the text
        position: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type EncodeResult<T> = Result<T, EncodeTextError>;
type DecodeResult<T> = Result<T, DecodeTextError>;

/// A holder of encoding and decoding mechanisms for text.
pub trait TextCodec {
    /// Obtain the defined term (unique name) of the text encoding.
    fn name(&self) -> &'static str;

    /// Decode the given byte buffer as a single string.
    fn decode(&self, text: &[u8]) -> DecodeResult<String>;

    /// Encode a text value into a byte vector.
    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>>;
}

/// Data type representing the default character set (ISO-IR 6),
/// a subset of ASCII.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultCharacterSetCodec;

impl TextCodec for DefaultCharacterSetCodec {
    fn name(&self) -> &'static str {
        "ISO_IR 6"
    }

    fn decode(&self, text: &[u8]) -> DecodeResult<String> {
        if let Some((position, &byte)) = text.iter().enumerate().find(|(_, b)| !b.is_ascii()) {
            return InvalidByteSnafu { byte, position }.fail();
        }
        Ok(text.iter().map(|&b| b as char).collect())
    }

    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>> {
        if let Some((position, character)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return UnrepresentableSnafu {
                character,
                position,
            }
            .fail();
        }
        Ok(text.as_bytes().to_vec())
    }
}

/// Remove the padding of a UID value:
/// trailing null characters and spaces.
pub fn trim_uid(uid: &str) -> &str {
    uid.trim_end_matches(|c| c == '\0' || c == ' ')
}

/// Decode a UID value from raw bytes in the default repertoire,
/// removing padding.
pub fn decode_uid(bytes: &[u8]) -> DecodeResult<String> {
    let text = DefaultCharacterSetCodec.decode(bytes)?;
    Ok(trim_uid(&text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_padded_uid() {
        assert_eq!(decode_uid(b"1.2.840.10008.1.2.1\0").unwrap(), "1.2.840.10008.1.2.1");
        assert_eq!(decode_uid(b"1.2.840.10008.1.2 ").unwrap(), "1.2.840.10008.1.2");
        assert!(decode_uid(&[b'1', 0xE9]).is_err());
    }

    #[test]
    fn encode_default_text() {
        let codec = DefaultCharacterSetCodec;
        assert_eq!(codec.encode("1.2.3").unwrap(), b"1.2.3".to_vec());
        assert!(matches!(
            codec.encode("1.2é"),
            Err(EncodeTextError::Unrepresentable { position: 3, .. })
        ));
    }
}
