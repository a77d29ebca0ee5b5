//! This module contains all DICOM data element header decoding logic.
//!
//! Decoders read element headers, item headers and tags,
//! in the syntax and byte order of a decoding session.
//! Values are read by the caller.

use self::explicit::ExplicitVRDecoder;
use self::implicit::ImplicitVRDecoder;
use crate::swap::SwapCode;
use crate::transfer_syntax::NegotiatedSyntax;
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::Tag;
use snafu::{Backtrace, Snafu};
use std::io::{self, Read};

pub mod basic;
pub mod explicit;
pub mod implicit;

/// Module-level error type:
/// for errors which may occur while decoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to read the beginning (tag) of the header: {}", source))]
    ReadHeaderTag {
        backtrace: Option<Backtrace>,
        source: io::Error,
    },
    #[snafu(display("Failed to read the item header: {}", source))]
    ReadItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's item length field: {}", source))]
    ReadItemLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's tag field: {}", source))]
    ReadTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's reserved bytes: {}", source))]
    ReadReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's element length field: {}", source))]
    ReadLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to read the header's value representation: {}", source))]
    ReadVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Element {} has VR UT and undefined length", tag))]
    UndefinedTextLength { tag: Tag, backtrace: Backtrace },
}

impl Error {
    /// Whether this error was caused by the end of the source
    /// while reading the tag at the beginning of an element header.
    pub fn is_eof_at_tag(&self) -> bool {
        matches!(self, Error::ReadHeaderTag { source, .. } if source.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Whether this error was caused by the end of the source,
    /// anywhere in the header.
    pub fn is_unexpected_eof(&self) -> bool {
        let source = match self {
            Error::ReadHeaderTag { source, .. }
            | Error::ReadItemHeader { source, .. }
            | Error::ReadItemLength { source, .. }
            | Error::ReadTag { source, .. }
            | Error::ReadReserved { source, .. }
            | Error::ReadLength { source, .. }
            | Error::ReadVr { source, .. } => source,
            Error::UndefinedTextLength { .. } => return false,
        };
        source.kind() == io::ErrorKind::UnexpectedEof
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/** Obtain a data element decoder for reading the data elements in a DICOM
 * file's Meta information. According to the standard, these are always
 * encoded in Explicit VR Little Endian.
 */
pub fn file_header_decoder() -> ExplicitVRDecoder {
    ExplicitVRDecoder::new(SwapCode::LittleEndian)
}

/// A decoded element header,
/// with the details of its encoding that the header itself does not keep.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawHeader {
    /// the decoded header
    pub header: DataElementHeader,
    /// the number of bytes read from the source
    pub bytes_read: usize,
    /// the two reserved bytes of an explicit VR header
    /// with a 32-bit length field
    pub reserved: Option<[u8; 2]>,
}

/** Type trait for reading and decoding DICOM element headers.
 *
 * Implementations return the header along with the number of bytes
 * read from the source, so that callers can keep track of the stream
 * position.
 */
pub trait Decode {
    /// The byte order used by this decoder.
    fn swap_code(&self) -> SwapCode;

    /// Fetch and decode the next data element header from the given source,
    /// keeping the reserved bytes of the header if it has any.
    ///
    /// Item delimiters (and other sentinels in group 0xFFFE) are
    /// decoded as a tag and a 32-bit length, without a VR.
    fn decode_raw_header<S>(&self, source: &mut S) -> Result<RawHeader>
    where
        S: ?Sized + Read;

    /// Fetch and decode the next data element header from the given source.
    fn decode_header<S>(&self, source: &mut S) -> Result<(DataElementHeader, usize)>
    where
        S: ?Sized + Read,
    {
        self.decode_raw_header(source)
            .map(|raw| (raw.header, raw.bytes_read))
    }

    /// Fetch and decode the next sequence item header from the given source:
    /// a tag and a 32-bit length, 8 bytes in total.
    ///
    /// The tag is not validated here.
    fn decode_item_header<S>(&self, source: &mut S) -> Result<(Tag, Length)>
    where
        S: ?Sized + Read;

    /// Decode a DICOM attribute tag from the given source.
    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read;
}

/// A header decoder for either syntax,
/// as determined at run time by the decoding session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ElementDecoder {
    /// Explicit VR headers
    Explicit(ExplicitVRDecoder),
    /// Implicit VR headers
    Implicit(ImplicitVRDecoder),
}

impl ElementDecoder {
    /// Create a decoder for the given syntax and byte order.
    /// An unknown syntax decodes as implicit VR.
    pub fn new(syntax: NegotiatedSyntax, swap_code: SwapCode) -> Self {
        match syntax {
            NegotiatedSyntax::Explicit => ElementDecoder::Explicit(ExplicitVRDecoder::new(swap_code)),
            NegotiatedSyntax::Implicit | NegotiatedSyntax::Unknown => {
                ElementDecoder::Implicit(ImplicitVRDecoder::new(swap_code))
            }
        }
    }

    /// Whether this decoder reads explicit VR headers.
    pub fn is_explicit(&self) -> bool {
        matches!(self, ElementDecoder::Explicit(_))
    }
}

impl Decode for ElementDecoder {
    fn swap_code(&self) -> SwapCode {
        match self {
            ElementDecoder::Explicit(d) => d.swap_code(),
            ElementDecoder::Implicit(d) => d.swap_code(),
        }
    }

    fn decode_raw_header<S>(&self, source: &mut S) -> Result<RawHeader>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::Explicit(d) => d.decode_raw_header(source),
            ElementDecoder::Implicit(d) => d.decode_raw_header(source),
        }
    }

    fn decode_item_header<S>(&self, source: &mut S) -> Result<(Tag, Length)>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::Explicit(d) => d.decode_item_header(source),
            ElementDecoder::Implicit(d) => d.decode_item_header(source),
        }
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        match self {
            ElementDecoder::Explicit(d) => d.decode_tag(source),
            ElementDecoder::Implicit(d) => d.decode_tag(source),
        }
    }
}
