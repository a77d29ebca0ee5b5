//! This module contains the DICOM data element header encoding logic,
//! the counterpart of [`decode`](crate::decode).
//! Headers are written in the syntax and byte order of a session,
//! so that decoded data sets can be written back.

use crate::swap::SwapCode;
use crate::transfer_syntax::NegotiatedSyntax;
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::{Tag, VR};
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{self, Write};

/// Module-level error type:
/// for errors which may occur while encoding DICOM data.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to write the header's tag field: {}", source))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write the header's value representation: {}", source))]
    WriteVr {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write the header's reserved bytes: {}", source))]
    WriteReserved {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write the header's length field: {}", source))]
    WriteLength {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Element {} has no value representation to write", tag))]
    MissingVr { tag: Tag, backtrace: Backtrace },
    #[snafu(display("Length {} of element {} does not fit the {} length field", len, tag, vr))]
    LengthOverflow {
        tag: Tag,
        vr: VR,
        len: Length,
        backtrace: Backtrace,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A basic encoder of unsigned integers and tags
/// in the byte order of a session.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct BasicEncoder {
    swap: SwapCode,
}

impl BasicEncoder {
    /// Create a basic encoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        BasicEncoder { swap }
    }

    /// Encode an unsigned short value to the given writer.
    pub fn encode_us<W: Write>(&self, mut to: W, value: u16) -> io::Result<()> {
        let mut buf = [0u8; 2];
        self.swap.write_u16(&mut buf, value);
        to.write_all(&buf)
    }

    /// Encode an unsigned long value to the given writer.
    pub fn encode_ul<W: Write>(&self, mut to: W, value: u32) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.swap.write_u32(&mut buf, value);
        to.write_all(&buf)
    }

    /// Encode a tag to the given writer.
    pub fn encode_tag<W: Write>(&self, mut to: W, tag: Tag) -> io::Result<()> {
        self.encode_us(&mut to, tag.group())?;
        self.encode_us(&mut to, tag.element())
    }
}

/** Type trait for a data element header encoder. */
pub trait Encode {
    /// Encode and write an element tag.
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    fn encode_element_header<W>(&self, to: W, header: DataElementHeader) -> Result<usize>
    where
        W: Write;

    /// Encode and write a sequence item header or delimiter:
    /// a tag in group 0xFFFE and a 32-bit length.
    fn encode_item_header<W>(&self, to: W, tag: Tag, len: Length) -> Result<()>
    where
        W: Write;
}

/// A data element header encoder for the explicit VR syntax.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ExplicitVREncoder {
    basic: BasicEncoder,
}

impl ExplicitVREncoder {
    /// Create an encoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        ExplicitVREncoder {
            basic: BasicEncoder::new(swap),
        }
    }
}

impl Encode for ExplicitVREncoder {
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        self.basic.encode_tag(to, tag).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, header: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        if header.tag.is_sentinel() {
            self.encode_item_header(to, header.tag, header.len)?;
            return Ok(8);
        }
        let vr = header.vr.context(MissingVrSnafu { tag: header.tag })?;
        self.encode_tag(&mut to, header.tag)?;
        to.write_all(&vr.to_bytes()).context(WriteVrSnafu)?;
        if vr.has_extended_length() {
            to.write_all(&[0, 0]).context(WriteReservedSnafu)?;
            self.basic
                .encode_ul(&mut to, header.len.0)
                .context(WriteLengthSnafu)?;
            Ok(12)
        } else {
            let len = header
                .len
                .get()
                .filter(|l| *l <= u32::from(u16::MAX))
                .context(LengthOverflowSnafu {
                    tag: header.tag,
                    vr,
                    len: header.len,
                })?;
            self.basic
                .encode_us(&mut to, len as u16)
                .context(WriteLengthSnafu)?;
            Ok(8)
        }
    }

    fn encode_item_header<W>(&self, mut to: W, tag: Tag, len: Length) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag(&mut to, tag)?;
        self.basic.encode_ul(&mut to, len.0).context(WriteLengthSnafu)
    }
}

/// A data element header encoder for the implicit VR syntax.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ImplicitVREncoder {
    basic: BasicEncoder,
}

impl ImplicitVREncoder {
    /// Create an encoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        ImplicitVREncoder {
            basic: BasicEncoder::new(swap),
        }
    }
}

impl Encode for ImplicitVREncoder {
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        self.basic.encode_tag(to, tag).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, header: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        self.encode_item_header(&mut to, header.tag, header.len)?;
        Ok(8)
    }

    fn encode_item_header<W>(&self, mut to: W, tag: Tag, len: Length) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag(&mut to, tag)?;
        self.basic.encode_ul(&mut to, len.0).context(WriteLengthSnafu)
    }
}

/// A header encoder for either syntax,
/// chosen at run time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ElementEncoder {
    /// Explicit VR headers
    Explicit(ExplicitVREncoder),
    /// Implicit VR headers
    Implicit(ImplicitVREncoder),
}

impl ElementEncoder {
    /// Create an encoder for the given syntax and byte order.
    /// An unknown syntax encodes as implicit VR.
    pub fn new(syntax: NegotiatedSyntax, swap_code: SwapCode) -> Self {
        match syntax {
            NegotiatedSyntax::Explicit => ElementEncoder::Explicit(ExplicitVREncoder::new(swap_code)),
            NegotiatedSyntax::Implicit | NegotiatedSyntax::Unknown => {
                ElementEncoder::Implicit(ImplicitVREncoder::new(swap_code))
            }
        }
    }
}

impl Encode for ElementEncoder {
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        match self {
            ElementEncoder::Explicit(e) => e.encode_tag(to, tag),
            ElementEncoder::Implicit(e) => e.encode_tag(to, tag),
        }
    }

    fn encode_element_header<W>(&self, to: W, header: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        match self {
            ElementEncoder::Explicit(e) => e.encode_element_header(to, header),
            ElementEncoder::Implicit(e) => e.encode_element_header(to, header),
        }
    }

    fn encode_item_header<W>(&self, to: W, tag: Tag, len: Length) -> Result<()>
    where
        W: Write,
    {
        match self {
            ElementEncoder::Explicit(e) => e.encode_item_header(to, tag, len),
            ElementEncoder::Implicit(e) => e.encode_item_header(to, tag, len),
        }
    }
}
