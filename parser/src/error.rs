//! Crate-level error types of the stream decoder.

use dcmio_core::{Length, Tag};
use dcmio_encoding::decode::Error as DecodeError;
use snafu::{Backtrace, Snafu};
use std::io;

/// The broad class of a decoding failure.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ErrorCategory {
    /// The stream breaks the structure of the format:
    /// inconsistent lengths, sentinels out of place,
    /// or nesting beyond the configured limit.
    /// Decoded values in an impossible state,
    /// such as pixel fragments handed to the byte swap pass,
    /// also fall here.
    StructuralViolation,
    /// The stream is in an encoding which this library does not decode.
    UnsupportedEncoding,
    /// The source failed, or ended before the data set did.
    Io,
}

/// An error which aborts the decoding of a stream.
///
/// No partially decoded data set is handed out after one of these.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read the file preamble"))]
    ReadPreamble {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read the first data element"))]
    ReadFirstElement {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not reposition the source"))]
    Seek {
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not read element header at position {}", position))]
    DecodeHeader {
        position: u64,
        #[snafu(backtrace)]
        source: DecodeError,
    },
    #[snafu(display("Could not read item header at position {}", position))]
    DecodeItemHeader {
        position: u64,
        #[snafu(backtrace)]
        source: DecodeError,
    },
    #[snafu(display("Could not read {} value bytes for element tagged {}", len, tag))]
    ReadValue {
        tag: Tag,
        len: u32,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("File meta element {} has undefined length", tag))]
    UndefinedMetaLength { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Could not read {} bytes of pixel data fragment", len))]
    ReadFragment {
        len: u32,
        source: io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Stream ended at position {} inside {} open sequences or items",
        position,
        depth
    ))]
    PrematureEnd {
        position: u64,
        depth: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Unrecognized group length pattern {:#010x}", raw))]
    UnknownByteOrder { raw: u32, backtrace: Backtrace },
    #[snafu(display("Transfer syntax {} is not supported", uid))]
    UnsupportedTransferSyntax { uid: String, backtrace: Backtrace },
    #[snafu(display(
        "Inconsistent sequence end: expected end at {} bytes but read {}",
        end_of_sequence,
        bytes_read
    ))]
    InconsistentSequenceEnd {
        end_of_sequence: u64,
        bytes_read: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Item delimiter at position {} inside an item of defined length {}",
        position,
        len
    ))]
    MixedItemTermination {
        position: u64,
        len: Length,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Nesting at position {} exceeds the maximum depth of {}",
        position,
        max_depth
    ))]
    DepthLimitExceeded {
        position: u64,
        max_depth: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Pixel data fragment at position {} has undefined length", position))]
    UndefinedFragmentLength { position: u64, backtrace: Backtrace },
    #[snafu(display(
        "Unexpected tag {} in encapsulated pixel data at position {}",
        tag,
        position
    ))]
    UnexpectedFragmentTag {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not bring values to the host byte order"))]
    SwapValues {
        #[snafu(backtrace)]
        source: crate::swap::Error,
    },
}

impl Error {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnknownByteOrder { .. } | Error::UnsupportedTransferSyntax { .. } => {
                ErrorCategory::UnsupportedEncoding
            }
            Error::InconsistentSequenceEnd { .. }
            | Error::MixedItemTermination { .. }
            | Error::DepthLimitExceeded { .. }
            | Error::UndefinedFragmentLength { .. }
            | Error::UnexpectedFragmentTag { .. }
            | Error::UndefinedMetaLength { .. }
            | Error::SwapValues { .. }
            | Error::DecodeHeader {
                source: DecodeError::UndefinedTextLength { .. },
                ..
            } => ErrorCategory::StructuralViolation,
            _ => ErrorCategory::Io,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err = UnknownByteOrderSnafu { raw: 8_u32 }.build();
        assert_eq!(err.category(), ErrorCategory::UnsupportedEncoding);
        assert!(err.to_string().contains("0x00000008"));

        let err = DepthLimitExceededSnafu {
            position: 40_u64,
            max_depth: 2_usize,
        }
        .build();
        assert_eq!(err.category(), ErrorCategory::StructuralViolation);

        let err = PrematureEndSnafu {
            position: 12_u64,
            depth: 1_usize,
        }
        .build();
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn swapping_pixel_fragments_is_structural() {
        use crate::swap::ByteSwapFilter;
        use dcmio_core::{DataElement, DataElementHeader, DataSet, Length, PixelFragmentSequence, Value, VR};
        use dcmio_encoding::SwapCode;
        use snafu::IntoError;

        let mut dataset = DataSet::new();
        dataset.push(DataElement::new(
            DataElementHeader::new(Tag::PIXEL_DATA, VR::OB, Length::UNDEFINED),
            Value::PixelSequence(PixelFragmentSequence::new(vec![], vec![vec![1, 2]])),
        ));
        let source = ByteSwapFilter::new(SwapCode::BadLittleEndian)
            .apply(&mut dataset)
            .unwrap_err();
        let err = SwapValuesSnafu.into_error(source);
        assert_eq!(err.category(), ErrorCategory::StructuralViolation);
    }
}
