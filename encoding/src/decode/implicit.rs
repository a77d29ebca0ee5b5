//! Implicit VR element header decoding, in any byte order.
//!
//! The value representation is not in the stream:
//! headers are returned without one,
//! and it is up to the caller to resolve it through a dictionary.

use crate::decode::basic::BasicDecoder;
use crate::decode::{Decode, RawHeader, ReadHeaderTagSnafu, ReadItemHeaderSnafu, ReadLengthSnafu, ReadTagSnafu, Result};
use crate::swap::SwapCode;
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::Tag;
use snafu::ResultExt;
use std::io::Read;

/// A data element header decoder for the implicit VR syntax.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct ImplicitVRDecoder {
    basic: BasicDecoder,
}

impl ImplicitVRDecoder {
    /// Create a decoder for the given byte order.
    pub fn new(swap: SwapCode) -> Self {
        ImplicitVRDecoder {
            basic: BasicDecoder::new(swap),
        }
    }
}

impl Decode for ImplicitVRDecoder {
    fn swap_code(&self) -> SwapCode {
        self.basic.swap_code()
    }

    fn decode_raw_header<S>(&self, mut source: &mut S) -> Result<RawHeader>
    where
        S: ?Sized + Read,
    {
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadHeaderTagSnafu)?;
        let len = self
            .basic
            .decode_ul(&mut source)
            .context(ReadLengthSnafu)?;
        Ok(RawHeader {
            header: DataElementHeader::implicit(tag, Length(len)),
            bytes_read: 8,
            reserved: None,
        })
    }

    fn decode_item_header<S>(&self, mut source: &mut S) -> Result<(Tag, Length)>
    where
        S: ?Sized + Read,
    {
        let tag = self
            .basic
            .decode_tag(&mut source)
            .context(ReadItemHeaderSnafu)?;
        let len = self
            .basic
            .decode_ul(&mut source)
            .context(ReadItemHeaderSnafu)?;
        Ok((tag, Length(len)))
    }

    fn decode_tag<S>(&self, source: &mut S) -> Result<Tag>
    where
        S: ?Sized + Read,
    {
        self.basic.decode_tag(source).context(ReadTagSnafu)
    }
}
